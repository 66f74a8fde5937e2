//! # vidframe
//!
//! Extract still frames from video files at fixed time intervals by driving
//! the `ffmpeg` command-line tool.
//!
//! `vidframe` probes a video's duration once, schedules one frame every `N`
//! seconds and runs `ffmpeg` once per frame, reporting progress after each
//! and stopping early when asked to. A single-frame "quick extract" takes a
//! snapshot at an arbitrary position.
//!
//! ## Quick Start
//!
//! ### Extract a Frame Every 30 Seconds
//!
//! ```no_run
//! use vidframe::{CancellationToken, ExtractionRequest, FrameExtractor, ImageFormat, NoOpObserver};
//!
//! let request = ExtractionRequest::new("input.mp4", "frames")
//!     .with_interval(30)
//!     .with_format(ImageFormat::Jpg);
//! let outcome = FrameExtractor::new()
//!     .extract(&request, &NoOpObserver, &CancellationToken::new())
//!     .unwrap();
//! println!("{outcome:?}");
//! ```
//!
//! ### Run in the Background and Follow Progress
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use vidframe::{
//!     CancellationToken, ChannelObserver, ExtractionEvent, ExtractionRequest, FrameExtractor,
//! };
//!
//! let (observer, events) = ChannelObserver::new();
//! let request = ExtractionRequest::new("input.mp4", "frames");
//! let handle = FrameExtractor::new()
//!     .spawn(request, Arc::new(observer), CancellationToken::new())
//!     .unwrap();
//!
//! for event in events.iter() {
//!     if let ExtractionEvent::Progress(progress) = &event {
//!         println!("{}", progress.frames_line());
//!     }
//!     if event.is_terminal() {
//!         break;
//!     }
//! }
//! handle.join().unwrap();
//! ```
//!
//! ### Take a Snapshot
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use vidframe::{FrameExtractor, QuickExtractRequest};
//!
//! let request = QuickExtractRequest::new("input.mp4", "snaps", Duration::from_secs(75));
//! let path = FrameExtractor::new().quick_extract(&request).unwrap();
//! ```
//!
//! ## Features
//!
//! - **Interval extraction**: one frame every 1 to 600 seconds, named
//!   `{base}_{index:03}.{ext}`
//! - **Output control**: PNG, JPEG, BMP or TIFF at a fixed set of
//!   resolutions
//! - **Hardware decoding hints**: `-hwaccel` with CUDA, DXVA2, QSV,
//!   D3D11VA, OpenCL or Vulkan
//! - **Progress & cancellation**: per-frame snapshots with an ETA, an
//!   observer trait, a channel observer and a `CancellationToken`
//! - **Validation**: pre-flight reports before anything is written
//! - **Pluggable process execution**: the [`ToolRunner`] trait
//!
//! ### Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `async` | `EventStream` for following a run from Tokio |
//! | `full` | Enables all of the above |
//!
//! ## Requirements
//!
//! An `ffmpeg` executable must be on `PATH`, or its location given through
//! [`ProcessRunner::with_program`].

pub mod command;
pub mod configuration;
pub mod error;
pub mod extractor;
pub mod ffmpeg;
pub mod hardware_acceleration;
pub mod logging;
pub mod probe;
pub mod progress;
pub mod runner;
pub mod schedule;
pub mod snapshot;
#[cfg(feature = "async")]
pub mod stream;
pub mod validation;

pub use command::{FrameCommand, probe_args};
pub use configuration::{
    DEFAULT_BASE_NAME, DEFAULT_INTERVAL, ExtractionRequest, ImageFormat, MAX_INTERVAL,
    MIN_INTERVAL, QuickExtractRequest, Resolution, encoder_for_format,
};
pub use error::VidframeError;
pub use extractor::{ExtractionHandle, ExtractionOutcome, ExtractionSummary, FrameExtractor};
pub use ffmpeg::FfmpegLogLevel;
pub use hardware_acceleration::{HardwareAccelerationMethod, available_hardware_methods};
pub use probe::{parse_duration, probe_duration, probe_many};
pub use progress::{
    CANCELLED_STATUS, CancellationToken, ChannelObserver, ExtractionEvent, ExtractionObserver,
    ExtractionProgress, NoOpObserver,
};
pub use runner::{ProcessRunner, ToolOutput, ToolRunner};
pub use schedule::{ExtractionPlan, ScheduledFrame, frame_count, frame_file_name};
pub use snapshot::preview_dimensions;
#[cfg(feature = "async")]
pub use stream::EventStream;
pub use validation::ValidationReport;
