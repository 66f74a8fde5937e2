//! Progress reporting and cancellation support.
//!
//! This module provides [`ExtractionObserver`] for following an extraction
//! frame by frame, [`CancellationToken`] for cooperative cancellation,
//! [`ExtractionProgress`] for per-frame snapshots, and
//! [`ChannelObserver`] / [`ExtractionEvent`] for consuming the same
//! notifications from another thread.
//!
//! # Example
//!
//! ```no_run
//! use vidframe::{
//!     CancellationToken, ExtractionObserver, ExtractionProgress, ExtractionRequest,
//!     FrameExtractor, VidframeError,
//! };
//!
//! struct PrintProgress;
//!
//! impl ExtractionObserver for PrintProgress {
//!     fn on_progress(&self, progress: &ExtractionProgress) {
//!         println!("{:.0}% {}", progress.percentage, progress.status_line());
//!     }
//! }
//!
//! let extractor = FrameExtractor::new();
//! let request = ExtractionRequest::new("input.mp4", "frames").with_interval(30);
//! extractor.extract(&request, &PrintProgress, &CancellationToken::new())?;
//! # Ok::<(), VidframeError>(())
//! ```

use std::path::{Path, PathBuf};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};

use crate::extractor::ExtractionSummary;
use crate::schedule::{ExtractionPlan, ScheduledFrame};

/// Status text emitted when a run stops because of cancellation.
pub const CANCELLED_STATUS: &str = "Extraction Cancelled!";

/// A snapshot taken after one frame's tool invocation has finished.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionProgress {
    /// Zero-based index of the frame just processed.
    pub index: u64,
    /// Total frames in this run.
    pub frame_count: u64,
    /// Position in the video the frame was taken from.
    pub timestamp: Duration,
    /// Wall-clock time since the run started.
    pub elapsed: Duration,
    /// Linear extrapolation of the time left.
    pub estimated_remaining: Duration,
    /// Completion percentage (0.0 to 100.0).
    pub percentage: f32,
    /// The file this frame was written to.
    pub output_path: PathBuf,
    /// Whether the tool reported success for this frame.
    pub succeeded: bool,
}

impl ExtractionProgress {
    /// Frames processed so far, including this one.
    pub fn frames_created(&self) -> u64 {
        self.index + 1
    }

    /// `Elapsed Time: 12s | Time Remaining: 40s`
    pub fn status_line(&self) -> String {
        format!(
            "Elapsed Time: {}s | Time Remaining: {}s",
            self.elapsed.as_secs(),
            self.estimated_remaining.as_secs()
        )
    }

    /// `Frames Created: 3/10`
    pub fn frames_line(&self) -> String {
        format!("Frames Created: {}/{}", self.frames_created(), self.frame_count)
    }
}

/// Receives notifications while an extraction runs.
///
/// Implementations must be [`Send`] and [`Sync`] because the extraction
/// usually runs on a worker thread. Every method has a no-op default, so an
/// observer only implements what it displays.
///
/// For one run the calls arrive in this order per frame: `on_progress`,
/// `on_status`, `on_frames_created`, `on_first_frame` (first frame only),
/// `on_frame`. A run
/// ends with exactly one of `on_done`, `on_cancelled` or `on_failed`.
///
/// Observers are **infallible**: they watch but cannot halt the run. Use
/// [`CancellationToken`] to stop it.
pub trait ExtractionObserver: Send + Sync {
    /// A frame was processed.
    fn on_progress(&self, _progress: &ExtractionProgress) {}

    /// A human-readable status line changed.
    fn on_status(&self, _status: &str) {}

    /// The frame counter changed, e.g. `Frames Created: 3/10`.
    fn on_frames_created(&self, _text: &str) {}

    /// The first frame of the run was written to `path`.
    fn on_first_frame(&self, _path: &Path) {}

    /// The most recent frame so far was written to `path`.
    fn on_frame(&self, _path: &Path) {}

    /// The run went through every scheduled frame.
    fn on_done(&self, _summary: &ExtractionSummary) {}

    /// The run stopped early after `frames_attempted` frames.
    fn on_cancelled(&self, _frames_attempted: u64) {}

    /// The run could not start (validation or probe failure).
    fn on_failed(&self, _message: &str) {}
}

/// An observer that discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl ExtractionObserver for NoOpObserver {}

/// Cooperative cancellation token backed by an [`AtomicBool`].
///
/// Clone this token and share it between threads; call
/// [`cancel`](CancellationToken::cancel) from any thread to request
/// cancellation. The extraction loop checks
/// [`is_cancelled`](CancellationToken::is_cancelled) before each frame, so
/// a frame whose tool invocation is already running still completes.
///
/// # Example
///
/// ```
/// use vidframe::CancellationToken;
///
/// let token = CancellationToken::new();
/// assert!(!token.is_cancelled());
///
/// // From another thread (or a signal handler, etc.):
/// token.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a new, non-cancelled token.
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request cancellation.
    ///
    /// All clones of this token will observe the cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Check whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Owned form of every observer notification.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionEvent {
    /// See [`ExtractionObserver::on_progress`].
    Progress(ExtractionProgress),
    /// See [`ExtractionObserver::on_status`].
    Status(String),
    /// See [`ExtractionObserver::on_frames_created`].
    FramesCreated(String),
    /// See [`ExtractionObserver::on_first_frame`].
    FirstFrame(PathBuf),
    /// See [`ExtractionObserver::on_frame`].
    Frame(PathBuf),
    /// See [`ExtractionObserver::on_done`].
    Completed(ExtractionSummary),
    /// See [`ExtractionObserver::on_cancelled`].
    Cancelled {
        /// Frames processed before the run stopped.
        frames_attempted: u64,
    },
    /// See [`ExtractionObserver::on_failed`].
    Failed(String),
}

impl ExtractionEvent {
    /// Whether this event ends a run.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ExtractionEvent::Completed(_)
                | ExtractionEvent::Cancelled { .. }
                | ExtractionEvent::Failed(_)
        )
    }
}

/// Forwards every notification as an [`ExtractionEvent`] over a channel.
///
/// Events keep their emission order. Sending never blocks; if the receiving
/// side has been dropped, events are discarded.
///
/// # Example
///
/// ```
/// use vidframe::{ChannelObserver, ExtractionEvent, ExtractionObserver};
///
/// let (observer, events) = ChannelObserver::new();
/// observer.on_status("hello");
/// assert_eq!(events.recv().unwrap(), ExtractionEvent::Status("hello".into()));
/// ```
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    sender: Sender<ExtractionEvent>,
}

impl ChannelObserver {
    /// Create an observer and the receiving end of its channel.
    pub fn new() -> (Self, Receiver<ExtractionEvent>) {
        let (sender, receiver) = crossbeam_channel::unbounded();
        (Self { sender }, receiver)
    }

    fn send(&self, event: ExtractionEvent) {
        let _ = self.sender.send(event);
    }
}

impl ExtractionObserver for ChannelObserver {
    fn on_progress(&self, progress: &ExtractionProgress) {
        self.send(ExtractionEvent::Progress(progress.clone()));
    }

    fn on_status(&self, status: &str) {
        self.send(ExtractionEvent::Status(status.to_string()));
    }

    fn on_frames_created(&self, text: &str) {
        self.send(ExtractionEvent::FramesCreated(text.to_string()));
    }

    fn on_first_frame(&self, path: &Path) {
        self.send(ExtractionEvent::FirstFrame(path.to_path_buf()));
    }

    fn on_frame(&self, path: &Path) {
        self.send(ExtractionEvent::Frame(path.to_path_buf()));
    }

    fn on_done(&self, summary: &ExtractionSummary) {
        self.send(ExtractionEvent::Completed(summary.clone()));
    }

    fn on_cancelled(&self, frames_attempted: u64) {
        self.send(ExtractionEvent::Cancelled { frames_attempted });
    }

    fn on_failed(&self, message: &str) {
        self.send(ExtractionEvent::Failed(message.to_string()));
    }
}

/// Internal helper that times a run and builds progress snapshots.
pub(crate) struct ProgressTracker {
    start_time: Instant,
    duration: Duration,
    interval: u32,
    frame_count: u64,
}

impl ProgressTracker {
    /// Start timing a run of `plan`.
    pub(crate) fn new(plan: &ExtractionPlan) -> Self {
        Self {
            start_time: Instant::now(),
            duration: plan.duration(),
            interval: plan.interval(),
            frame_count: plan.frame_count(),
        }
    }

    /// Snapshot after `frame` finished, measured against the run's start.
    pub(crate) fn snapshot(&self, frame: &ScheduledFrame, succeeded: bool) -> ExtractionProgress {
        self.snapshot_at(frame, succeeded, self.start_time.elapsed())
    }

    /// Snapshot for an explicit `elapsed` time.
    ///
    /// The remaining time is `(duration - timestamp) / interval` frames
    /// left, each costing the average time per frame so far.
    pub(crate) fn snapshot_at(
        &self,
        frame: &ScheduledFrame,
        succeeded: bool,
        elapsed: Duration,
    ) -> ExtractionProgress {
        let done = frame.index + 1;
        let frames_left = (self.duration.as_secs_f64() - frame.timestamp.as_secs_f64()).max(0.0)
            / f64::from(self.interval.max(1));
        let per_frame = elapsed.as_secs_f64() / done as f64;
        let estimated_remaining = Duration::from_secs_f64(frames_left * per_frame);

        let percentage = if self.frame_count > 0 {
            done as f32 * 100.0 / self.frame_count as f32
        } else {
            100.0
        };

        ExtractionProgress {
            index: frame.index,
            frame_count: self.frame_count,
            timestamp: frame.timestamp,
            elapsed,
            estimated_remaining,
            percentage,
            output_path: frame.output_path.clone(),
            succeeded,
        }
    }
}
