//! Structured argument lists for the external tool.
//!
//! [`FrameCommand`] describes a single-frame capture by its named parts
//! (seek time, input, filter, frame limit, codec, output and the optional
//! acceleration and logging flags) and renders them in the one order the
//! tool expects:
//!
//! ```text
//! [-hwaccel <method>] [-y] [-loglevel <level>] -ss <seconds> -i <input>
//!     -vf <filter> -vframes <n> -c:v <codec> -an <output>
//! ```
//!
//! The acceleration flag is an input option and therefore always comes
//! directly after the program name.

use std::ffi::OsString;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};

use crate::ffmpeg::FfmpegLogLevel;
use crate::hardware_acceleration::HardwareAccelerationMethod;

/// One single-frame capture invocation.
///
/// # Example
///
/// ```
/// use vidframe::FrameCommand;
///
/// let command = FrameCommand::new("in.mp4", "out/frame_001.png")
///     .with_seek_seconds(30.0)
///     .with_scale(1920, 1080)
///     .with_codec("png");
///
/// let args: Vec<String> = command
///     .to_args()
///     .into_iter()
///     .map(|arg| arg.to_string_lossy().into_owned())
///     .collect();
/// assert_eq!(
///     args,
///     ["-ss", "30", "-i", "in.mp4", "-vf", "scale=1920:1080", "-vframes", "1",
///      "-c:v", "png", "-an", "out/frame_001.png"],
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FrameCommand {
    hardware_method: Option<HardwareAccelerationMethod>,
    overwrite: bool,
    log_level: Option<FfmpegLogLevel>,
    seek_seconds: f64,
    input: PathBuf,
    filter: Option<String>,
    frame_limit: u32,
    codec: Option<String>,
    drop_audio: bool,
    output: PathBuf,
}

impl FrameCommand {
    /// Capture one frame of `input` at the start into `output`.
    pub fn new<I: Into<PathBuf>, O: Into<PathBuf>>(input: I, output: O) -> Self {
        Self {
            hardware_method: None,
            overwrite: false,
            log_level: None,
            seek_seconds: 0.0,
            input: input.into(),
            filter: None,
            frame_limit: 1,
            codec: None,
            drop_audio: true,
            output: output.into(),
        }
    }

    /// Seek position in seconds. Whole values render without a fraction.
    #[must_use]
    pub fn with_seek_seconds(mut self, seconds: f64) -> Self {
        self.seek_seconds = seconds.max(0.0);
        self
    }

    /// Scale filter; `-1` for one side keeps the source aspect ratio.
    #[must_use]
    pub fn with_scale(mut self, width: i64, height: i64) -> Self {
        self.filter = Some(format!("scale={width}:{height}"));
        self
    }

    /// Encoder passed to `-c:v`.
    #[must_use]
    pub fn with_codec<S: Into<String>>(mut self, codec: S) -> Self {
        self.codec = Some(codec.into());
        self
    }

    /// Add `-hwaccel <method>` when `method` is set.
    #[must_use]
    pub fn with_hardware_method(mut self, method: Option<HardwareAccelerationMethod>) -> Self {
        self.hardware_method = method;
        self
    }

    /// Add `-y`.
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Add `-loglevel <level>` when `level` is set.
    #[must_use]
    pub fn with_log_level(mut self, level: Option<FfmpegLogLevel>) -> Self {
        self.log_level = level;
        self
    }

    /// The file this command writes.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Render the argument list (without the program name).
    pub fn to_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::with_capacity(18);

        if let Some(method) = self.hardware_method {
            args.push("-hwaccel".into());
            args.push(method.as_str().into());
        }
        if self.overwrite {
            args.push("-y".into());
        }
        if let Some(level) = self.log_level {
            args.push("-loglevel".into());
            args.push(level.as_str().into());
        }

        args.push("-ss".into());
        args.push(self.seek_seconds.to_string().into());
        args.push("-i".into());
        args.push(self.input.clone().into_os_string());

        if let Some(filter) = &self.filter {
            args.push("-vf".into());
            args.push(filter.into());
        }

        args.push("-vframes".into());
        args.push(self.frame_limit.to_string().into());

        if let Some(codec) = &self.codec {
            args.push("-c:v".into());
            args.push(codec.into());
        }
        if self.drop_audio {
            args.push("-an".into());
        }

        args.push(self.output.clone().into_os_string());
        args
    }
}

impl Display for FrameCommand {
    /// Shell-like rendering for log messages; arguments containing spaces
    /// are quoted.
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let rendered: Vec<String> = self
            .to_args()
            .iter()
            .map(|arg| {
                let text = arg.to_string_lossy();
                if text.contains(' ') {
                    format!("\"{text}\"")
                } else {
                    text.into_owned()
                }
            })
            .collect();
        write!(f, "{}", rendered.join(" "))
    }
}

/// Arguments that make the tool print the media information of `video`.
pub fn probe_args(video: &Path) -> Vec<OsString> {
    vec!["-i".into(), video.as_os_str().to_os_string()]
}
