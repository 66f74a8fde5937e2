//! Hardware-accelerated decoding hints.
//!
//! The external tool accepts a `-hwaccel <method>` flag that offloads frame
//! decoding to a platform or vendor backend. [`HardwareAccelerationMethod`]
//! enumerates the backends this crate knows how to request, and
//! [`available_hardware_methods`] asks the installed tool which of them it was
//! built with.
//!
//! Availability depends on both the tool's build and the host's GPU
//! drivers. A method the host cannot use makes the per-frame invocation fail,
//! which is reported like any other per-frame failure.

use std::ffi::OsString;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::error::VidframeError;
use crate::runner::ToolRunner;

/// Backends that can be passed to the tool's `-hwaccel` flag.
///
/// # Example
///
/// ```
/// use vidframe::HardwareAccelerationMethod;
///
/// let method: HardwareAccelerationMethod = "qsv".parse().unwrap();
/// assert_eq!(method, HardwareAccelerationMethod::Qsv);
/// assert_eq!(method.as_str(), "qsv");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HardwareAccelerationMethod {
    /// NVIDIA CUDA (Linux, Windows). This is the default.
    #[default]
    Cuda,
    /// DirectX Video Acceleration 2 (Windows).
    Dxva2,
    /// Intel Quick Sync Video (cross-platform).
    Qsv,
    /// Direct3D 11 Video Acceleration (Windows).
    D3d11va,
    /// OpenCL (cross-platform).
    OpenCl,
    /// Vulkan (cross-platform).
    Vulkan,
}

impl HardwareAccelerationMethod {
    /// Every supported method, in presentation order.
    pub const ALL: [HardwareAccelerationMethod; 6] = [
        HardwareAccelerationMethod::Cuda,
        HardwareAccelerationMethod::Dxva2,
        HardwareAccelerationMethod::Qsv,
        HardwareAccelerationMethod::D3d11va,
        HardwareAccelerationMethod::OpenCl,
        HardwareAccelerationMethod::Vulkan,
    ];

    /// The identifier passed to `-hwaccel`.
    pub fn as_str(self) -> &'static str {
        match self {
            HardwareAccelerationMethod::Cuda => "cuda",
            HardwareAccelerationMethod::Dxva2 => "dxva2",
            HardwareAccelerationMethod::Qsv => "qsv",
            HardwareAccelerationMethod::D3d11va => "d3d11va",
            HardwareAccelerationMethod::OpenCl => "opencl",
            HardwareAccelerationMethod::Vulkan => "vulkan",
        }
    }
}

impl Display for HardwareAccelerationMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for HardwareAccelerationMethod {
    type Err = VidframeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lowered = value.trim().to_ascii_lowercase();
        HardwareAccelerationMethod::ALL
            .into_iter()
            .find(|method| method.as_str() == lowered)
            .ok_or_else(|| VidframeError::UnsupportedHardwareMethod(value.to_string()))
    }
}

/// List the supported methods the installed tool reports via `-hwaccels`.
///
/// Methods the tool lists that this crate does not know (for example
/// `vaapi` or `videotoolbox`) are skipped.
pub fn available_hardware_methods(
    runner: &dyn ToolRunner,
) -> Result<Vec<HardwareAccelerationMethod>, VidframeError> {
    let args: [OsString; 2] = ["-hide_banner".into(), "-hwaccels".into()];
    let output = runner.run(&args)?;

    let methods = output
        .stdout
        .lines()
        .filter_map(|line| line.trim().parse::<HardwareAccelerationMethod>().ok())
        .collect();

    Ok(methods)
}
