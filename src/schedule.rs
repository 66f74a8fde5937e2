//! Interval scheduling.
//!
//! Turns a request and a probed duration into the list of frames to
//! capture. Everything here is pure: no process is started and nothing
//! touches the file system, which keeps the arithmetic easy to check.
//!
//! For a duration `D` and an interval `I` the plan holds `floor(D / I)`
//! frames (with `D` truncated to whole seconds first), taken at
//! `0, I, 2I, ...`. A video shorter than one interval therefore yields an
//! empty plan.

use std::path::PathBuf;
use std::time::Duration;

use crate::command::FrameCommand;
use crate::configuration::ExtractionRequest;

/// Largest frame count whose file names are guaranteed distinct. Indices
/// are zero-padded to three digits, so `frame_1000` and beyond widen the
/// name instead of colliding, but they no longer sort lexically.
pub const MAX_DISTINCT_PADDED_FRAMES: u64 = 1000;

/// Number of frames for `duration` at one frame every `interval` seconds.
///
/// ```
/// use std::time::Duration;
///
/// assert_eq!(vidframe::frame_count(Duration::from_secs(95), 30), 3);
/// assert_eq!(vidframe::frame_count(Duration::from_secs(10), 30), 0);
/// ```
pub fn frame_count(duration: Duration, interval: u32) -> u64 {
    if interval == 0 {
        return 0;
    }
    duration.as_secs() / u64::from(interval)
}

/// File name of the frame at `index`: `{base}_{index:03}.{extension}`.
pub fn frame_file_name(base_name: &str, index: u64, extension: &str) -> String {
    format!("{base_name}_{index:03}.{extension}")
}

/// One frame of a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledFrame {
    /// Zero-based position in the plan.
    pub index: u64,
    /// Where in the video the frame is taken.
    pub timestamp: Duration,
    /// The file the frame is written to.
    pub output_path: PathBuf,
}

impl ScheduledFrame {
    /// The tool invocation that captures this frame for `request`.
    pub fn command(&self, request: &ExtractionRequest) -> FrameCommand {
        let (width, height) = request.resolution().dimensions();

        FrameCommand::new(request.video_path(), &self.output_path)
            .with_hardware_method(request.hardware_method())
            .with_overwrite(request.overwrite)
            .with_log_level(request.log_level)
            .with_seek_seconds(self.timestamp.as_secs() as f64)
            .with_scale(i64::from(width), i64::from(height))
            .with_codec(request.format().encoder())
    }
}

/// Every frame of one extraction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionPlan {
    duration: Duration,
    interval: u32,
    frames: Vec<ScheduledFrame>,
}

impl ExtractionPlan {
    /// Schedule `request` against a video of length `duration`.
    pub fn new(request: &ExtractionRequest, duration: Duration) -> Self {
        let interval = request.interval();
        let count = frame_count(duration, interval);
        let extension = request.format().extension();

        let frames = (0..count)
            .map(|index| ScheduledFrame {
                index,
                timestamp: Duration::from_secs(index * u64::from(interval)),
                output_path: request.output_dir().join(frame_file_name(
                    request.base_name(),
                    index,
                    extension,
                )),
            })
            .collect();

        Self {
            duration,
            interval,
            frames,
        }
    }

    /// The probed duration the plan was built for.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Seconds between frames.
    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Number of frames in the plan.
    pub fn frame_count(&self) -> u64 {
        self.frames.len() as u64
    }

    /// The scheduled frames, in capture order.
    pub fn frames(&self) -> &[ScheduledFrame] {
        &self.frames
    }

    /// Whether the plan has nothing to capture.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
