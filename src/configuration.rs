//! Extraction configuration.
//!
//! [`ExtractionRequest`] is the immutable bundle of parameters for an
//! interval extraction, and [`QuickExtractRequest`] the one for a single
//! snapshot. Both are built with chained `with_*` methods on top of
//! sensible defaults.
//!
//! # Example
//!
//! ```
//! use vidframe::{ExtractionRequest, HardwareAccelerationMethod, ImageFormat, Resolution};
//!
//! let request = ExtractionRequest::new("input.mp4", "frames")
//!     .with_interval(30)
//!     .with_base_name("scene")
//!     .with_format(ImageFormat::Jpg)
//!     .with_resolution(Resolution::Hd1080)
//!     .with_hardware_acceleration(true)
//!     .with_hardware_method(HardwareAccelerationMethod::Qsv);
//!
//! assert_eq!(request.interval(), 30);
//! assert_eq!(request.base_name(), "scene");
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::error::VidframeError;
use crate::ffmpeg::FfmpegLogLevel;
use crate::hardware_acceleration::HardwareAccelerationMethod;

/// Base name used for frame files when none is given.
pub const DEFAULT_BASE_NAME: &str = "frame";

/// Interval used when none is given, in seconds.
pub const DEFAULT_INTERVAL: u32 = 10;

/// Smallest accepted interval, in seconds.
pub const MIN_INTERVAL: u32 = 1;

/// Largest accepted interval, in seconds.
pub const MAX_INTERVAL: u32 = 600;

/// Map an output format name to the tool's encoder identifier.
///
/// Unrecognised names are passed through unchanged, leaving it to the tool
/// to accept or reject them.
///
/// ```
/// assert_eq!(vidframe::encoder_for_format("jpg"), "mjpeg");
/// assert_eq!(vidframe::encoder_for_format("webp"), "webp");
/// ```
pub fn encoder_for_format(format: &str) -> &str {
    match format {
        "jpg" => "mjpeg",
        "png" => "png",
        "bmp" => "bmp",
        "tiff" => "tiff",
        other => other,
    }
}

/// Output image format for extracted frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Lossless PNG. This is the default.
    #[default]
    Png,
    /// JPEG, encoded with the tool's `mjpeg` encoder.
    Jpg,
    /// Windows bitmap.
    Bmp,
    /// TIFF.
    Tiff,
}

impl ImageFormat {
    /// Every supported format, in presentation order.
    pub const ALL: [ImageFormat; 4] = [
        ImageFormat::Png,
        ImageFormat::Jpg,
        ImageFormat::Bmp,
        ImageFormat::Tiff,
    ];

    /// File extension written for this format (without the dot).
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpg => "jpg",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Tiff => "tiff",
        }
    }

    /// The encoder passed to `-c:v`.
    pub fn encoder(self) -> &'static str {
        encoder_for_format(self.extension())
    }
}

impl Display for ImageFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.extension())
    }
}

impl FromStr for ImageFormat {
    type Err = VidframeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpg),
            "bmp" => Ok(ImageFormat::Bmp),
            "tiff" | "tif" => Ok(ImageFormat::Tiff),
            _ => Err(VidframeError::UnsupportedFormat(value.to_string())),
        }
    }
}

/// Target resolution presets for extracted frames.
///
/// Frames are scaled to exactly these dimensions; the source aspect ratio
/// is not preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Resolution {
    /// 3840×2160. This is the default.
    #[default]
    Uhd4k,
    /// 2560×1440.
    Qhd2k,
    /// 1920×1080.
    Hd1080,
    /// 1280×720.
    Hd720,
    /// 640×480.
    Vga640,
    /// 854×480.
    Wide480,
}

impl Resolution {
    /// Every preset, in presentation order.
    pub const ALL: [Resolution; 6] = [
        Resolution::Uhd4k,
        Resolution::Qhd2k,
        Resolution::Hd1080,
        Resolution::Hd720,
        Resolution::Vga640,
        Resolution::Wide480,
    ];

    /// Returns `(width, height)`.
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            Resolution::Uhd4k => (3840, 2160),
            Resolution::Qhd2k => (2560, 1440),
            Resolution::Hd1080 => (1920, 1080),
            Resolution::Hd720 => (1280, 720),
            Resolution::Vga640 => (640, 480),
            Resolution::Wide480 => (854, 480),
        }
    }

    /// Short human label, e.g. `1080p`.
    pub fn label(self) -> &'static str {
        match self {
            Resolution::Uhd4k => "4K",
            Resolution::Qhd2k => "2K",
            Resolution::Hd1080 => "1080p",
            Resolution::Hd720 => "720p",
            Resolution::Vga640 => "640p",
            Resolution::Wide480 => "480p",
        }
    }
}

impl Display for Resolution {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let (width, height) = self.dimensions();
        write!(f, "{width}x{height}")
    }
}

impl FromStr for Resolution {
    type Err = VidframeError;

    /// Accepts `WIDTHxHEIGHT` for one of the presets, a label such as
    /// `1080p`, or the combined form `1080p (1920x1080)`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let dimensions = match trimmed.split_once('(') {
            Some((_, rest)) => rest.trim_end_matches(')').trim(),
            None => trimmed,
        };

        Resolution::ALL
            .into_iter()
            .find(|preset| {
                preset.to_string() == dimensions.to_ascii_lowercase()
                    || preset.label().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| VidframeError::UnsupportedResolution(value.to_string()))
    }
}

/// Parameters for one interval extraction run.
///
/// Once handed to [`FrameExtractor::extract`](crate::FrameExtractor::extract)
/// the request is only read. All fields have defaults except the two
/// paths.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionRequest {
    pub(crate) video_path: PathBuf,
    pub(crate) output_dir: PathBuf,
    pub(crate) interval: u32,
    pub(crate) base_name: Option<String>,
    pub(crate) format: ImageFormat,
    pub(crate) resolution: Resolution,
    pub(crate) hardware_acceleration: bool,
    pub(crate) hardware_method: HardwareAccelerationMethod,
    pub(crate) overwrite: bool,
    pub(crate) log_level: Option<FfmpegLogLevel>,
}

impl ExtractionRequest {
    /// Create a request with default settings.
    ///
    /// Defaults: 10 second interval, base name `frame`, PNG output at
    /// 3840×2160, no hardware acceleration, no overwriting.
    pub fn new<V: Into<PathBuf>, O: Into<PathBuf>>(video_path: V, output_dir: O) -> Self {
        Self {
            video_path: video_path.into(),
            output_dir: output_dir.into(),
            interval: DEFAULT_INTERVAL,
            base_name: None,
            format: ImageFormat::default(),
            resolution: Resolution::default(),
            hardware_acceleration: false,
            hardware_method: HardwareAccelerationMethod::default(),
            overwrite: false,
            log_level: None,
        }
    }

    /// Set the spacing between captured frames, in whole seconds.
    ///
    /// The value is checked when the extraction starts; it must lie in
    /// `1..=600`.
    #[must_use]
    pub fn with_interval(mut self, seconds: u32) -> Self {
        self.interval = seconds;
        self
    }

    /// Set the base name of the frame files. An empty name falls back to
    /// `frame`.
    #[must_use]
    pub fn with_base_name<S: Into<String>>(mut self, name: S) -> Self {
        self.base_name = Some(name.into());
        self
    }

    /// Set the output image format.
    #[must_use]
    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the target resolution.
    #[must_use]
    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Enable or disable the `-hwaccel` hint.
    #[must_use]
    pub fn with_hardware_acceleration(mut self, enabled: bool) -> Self {
        self.hardware_acceleration = enabled;
        self
    }

    /// Choose the acceleration backend. Ignored unless acceleration is
    /// enabled.
    #[must_use]
    pub fn with_hardware_method(mut self, method: HardwareAccelerationMethod) -> Self {
        self.hardware_method = method;
        self
    }

    /// Let the tool replace existing frame files (`-y`).
    ///
    /// Without this an existing file makes that frame's invocation fail.
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Pass `-loglevel` to every extraction command.
    #[must_use]
    pub fn with_log_level(mut self, level: FfmpegLogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    /// The source video.
    pub fn video_path(&self) -> &Path {
        &self.video_path
    }

    /// The directory frames are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Interval between frames, in seconds.
    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// The effective base name of frame files.
    pub fn base_name(&self) -> &str {
        match self.base_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_BASE_NAME,
        }
    }

    /// Output image format.
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Target resolution.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// The acceleration backend to request, or `None` when acceleration is
    /// disabled.
    pub fn hardware_method(&self) -> Option<HardwareAccelerationMethod> {
        self.hardware_acceleration.then_some(self.hardware_method)
    }
}

/// Parameters for a single snapshot at a playback position.
#[derive(Debug, Clone, PartialEq)]
pub struct QuickExtractRequest {
    pub(crate) video_path: PathBuf,
    pub(crate) output_dir: PathBuf,
    pub(crate) position: Duration,
    pub(crate) hardware_method: Option<HardwareAccelerationMethod>,
    pub(crate) overwrite: bool,
}

impl QuickExtractRequest {
    /// Snapshot `video_path` at `position` into `output_dir`.
    pub fn new<V: Into<PathBuf>, O: Into<PathBuf>>(
        video_path: V,
        output_dir: O,
        position: Duration,
    ) -> Self {
        Self {
            video_path: video_path.into(),
            output_dir: output_dir.into(),
            position,
            hardware_method: None,
            overwrite: false,
        }
    }

    /// Request hardware-accelerated decoding with `method`.
    #[must_use]
    pub fn with_hardware_method(mut self, method: HardwareAccelerationMethod) -> Self {
        self.hardware_method = Some(method);
        self
    }

    /// Let the tool replace an existing snapshot file (`-y`).
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// The video to snapshot.
    pub fn video_path(&self) -> &Path {
        &self.video_path
    }

    /// Directory the snapshot is written into.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// The playback position.
    pub fn position(&self) -> Duration {
        self.position
    }

    /// The playback position, in seconds.
    pub fn position_seconds(&self) -> f64 {
        self.position.as_secs_f64()
    }

    /// Where the snapshot will be written: `snapshot_{whole seconds}.png`.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("snapshot_{}.png", self.position.as_secs()))
    }
}
