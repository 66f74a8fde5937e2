//! Interval frame extraction.
//!
//! [`FrameExtractor`] is the engine: it validates a request, probes the
//! video's duration once, schedules the frames and runs the tool once per
//! frame, reporting to an [`ExtractionObserver`] after each. It can run on
//! the caller's thread ([`extract`](FrameExtractor::extract)) or on a
//! background thread ([`spawn`](FrameExtractor::spawn)).
//!
//! A single frame whose tool invocation fails does not end the run: the
//! failure is logged, recorded in the [`ExtractionSummary`], and the next
//! frame is attempted.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, error, info};

use crate::configuration::ExtractionRequest;
use crate::error::VidframeError;
use crate::probe::probe_duration;
use crate::progress::{CANCELLED_STATUS, CancellationToken, ExtractionObserver, ProgressTracker};
use crate::runner::{ProcessRunner, ToolRunner};
use crate::schedule::ExtractionPlan;
use crate::validation::check_request;

/// Result of a run that went through every scheduled frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionSummary {
    /// Frames scheduled and attempted.
    pub frame_count: u64,
    /// Indices whose tool invocation failed.
    pub failed_frames: Vec<u64>,
    /// Where the frames were written.
    pub output_dir: PathBuf,
}

impl ExtractionSummary {
    /// Frames the tool reported as written.
    pub fn succeeded_frames(&self) -> u64 {
        self.frame_count - self.failed_frames.len() as u64
    }
}

/// How a run that started ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    /// Every scheduled frame was attempted.
    Completed(ExtractionSummary),
    /// The run was cancelled before frame `frames_attempted`.
    Cancelled {
        /// Frames attempted before cancellation took effect.
        frames_attempted: u64,
    },
}

impl ExtractionOutcome {
    /// Returns `true` for [`ExtractionOutcome::Completed`].
    pub fn is_completed(&self) -> bool {
        matches!(self, ExtractionOutcome::Completed(_))
    }

    /// Returns `true` for [`ExtractionOutcome::Cancelled`].
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ExtractionOutcome::Cancelled { .. })
    }
}

/// Runs frame extractions through a [`ToolRunner`].
///
/// Only one extraction may be active per extractor (and its clones, which
/// share that state). Starting another while one is running fails with
/// [`VidframeError::ExtractionInProgress`] instead of letting two runs
/// write into the same directory.
///
/// # Example
///
/// ```no_run
/// use vidframe::{CancellationToken, ExtractionRequest, FrameExtractor, NoOpObserver};
///
/// let extractor = FrameExtractor::new();
/// let request = ExtractionRequest::new("input.mp4", "frames").with_interval(30);
/// let outcome = extractor.extract(&request, &NoOpObserver, &CancellationToken::new())?;
/// assert!(outcome.is_completed());
/// # Ok::<(), vidframe::VidframeError>(())
/// ```
#[derive(Clone)]
pub struct FrameExtractor {
    runner: Arc<dyn ToolRunner>,
    pub(crate) active: Arc<AtomicBool>,
}

impl FrameExtractor {
    /// An extractor that runs `ffmpeg` from `PATH`.
    pub fn new() -> Self {
        Self::with_runner(Arc::new(ProcessRunner::new()))
    }

    /// An extractor that runs the tool through `runner`.
    pub fn with_runner(runner: Arc<dyn ToolRunner>) -> Self {
        Self {
            runner,
            active: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The runner used for every invocation.
    pub fn runner(&self) -> &dyn ToolRunner {
        self.runner.as_ref()
    }

    /// Whether an extraction is currently running.
    pub fn is_busy(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Probe the duration of `video_path`.
    pub fn probe(&self, video_path: &Path) -> Result<Duration, VidframeError> {
        probe_duration(self.runner(), video_path)
    }

    /// Validate `request`, probe its video and return the schedule without
    /// running anything.
    pub fn plan(&self, request: &ExtractionRequest) -> Result<ExtractionPlan, VidframeError> {
        check_request(request)?;
        let duration = self.probe(request.video_path())?;
        Ok(ExtractionPlan::new(request, duration))
    }

    /// Run `request` to completion or cancellation on the current thread.
    ///
    /// The output directory is created if missing. The call blocks for
    /// every tool invocation, so keep it off any thread that must stay
    /// responsive (see [`spawn`](FrameExtractor::spawn)).
    ///
    /// # Errors
    ///
    /// - [`VidframeError::ExtractionInProgress`] if another run is active.
    /// - Validation errors ([`VidframeError::VideoNotFound`],
    ///   [`VidframeError::MissingOutputDirectory`],
    ///   [`VidframeError::InvalidInterval`]).
    /// - [`VidframeError::DurationNotFound`] or [`VidframeError::ToolSpawn`]
    ///   if the duration cannot be probed. No frame is attempted.
    /// - [`VidframeError::IoError`] if the output directory cannot be
    ///   created.
    ///
    /// Cancellation is not an error: it yields
    /// [`ExtractionOutcome::Cancelled`].
    pub fn extract(
        &self,
        request: &ExtractionRequest,
        observer: &dyn ExtractionObserver,
        token: &CancellationToken,
    ) -> Result<ExtractionOutcome, VidframeError> {
        let _guard = ActiveRun::acquire(&self.active)?;
        self.run(request, observer, token)
    }

    /// Run `request` on a background thread.
    ///
    /// The busy check happens before the thread starts, so a rejected
    /// request fails here rather than from [`ExtractionHandle::join`].
    pub fn spawn(
        &self,
        request: ExtractionRequest,
        observer: Arc<dyn ExtractionObserver>,
        token: CancellationToken,
    ) -> Result<ExtractionHandle, VidframeError> {
        let guard = ActiveRun::acquire(&self.active)?;
        let extractor = self.clone();
        let worker_token = token.clone();

        let thread = thread::Builder::new()
            .name("vidframe-extract".to_string())
            .spawn(move || {
                let _guard = guard;
                extractor.run(&request, observer.as_ref(), &worker_token)
            })?;

        Ok(ExtractionHandle { token, thread })
    }

    pub(crate) fn run(
        &self,
        request: &ExtractionRequest,
        observer: &dyn ExtractionObserver,
        token: &CancellationToken,
    ) -> Result<ExtractionOutcome, VidframeError> {
        let plan = match self.prepare(request) {
            Ok(plan) => plan,
            Err(error) => {
                error!("{error}");
                observer.on_status(&error.to_string());
                observer.on_failed(&error.to_string());
                return Err(error);
            }
        };

        info!(
            "Extraction started for {} frames from {}.",
            plan.frame_count(),
            request.video_path().display()
        );

        let tracker = ProgressTracker::new(&plan);
        let mut failed_frames = Vec::new();

        for frame in plan.frames() {
            if token.is_cancelled() {
                info!("Extraction cancelled by the user after {} frame(s).", frame.index);
                observer.on_status(CANCELLED_STATUS);
                observer.on_cancelled(frame.index);
                return Ok(ExtractionOutcome::Cancelled {
                    frames_attempted: frame.index,
                });
            }

            let command = frame.command(request);
            debug!("{} {command}", self.runner.program().to_string_lossy());

            let succeeded = match self.runner.run(&command.to_args()) {
                Ok(output) if output.success => true,
                Ok(output) => {
                    error!(
                        "Error on extracting frame {}: {}",
                        frame.index,
                        output.stderr.trim_end()
                    );
                    false
                }
                Err(spawn_error) => {
                    error!("Error on extracting frame {}: {spawn_error}", frame.index);
                    false
                }
            };
            if !succeeded {
                failed_frames.push(frame.index);
            }

            let progress = tracker.snapshot(frame, succeeded);
            observer.on_progress(&progress);
            observer.on_status(&progress.status_line());
            observer.on_frames_created(&progress.frames_line());
            if frame.index == 0 {
                observer.on_first_frame(&frame.output_path);
            }
            observer.on_frame(&frame.output_path);
        }

        let summary = ExtractionSummary {
            frame_count: plan.frame_count(),
            failed_frames,
            output_dir: request.output_dir().to_path_buf(),
        };
        info!(
            "Extraction completed. {} frames extracted to {}.",
            summary.frame_count,
            summary.output_dir.display()
        );
        observer.on_done(&summary);

        Ok(ExtractionOutcome::Completed(summary))
    }

    /// Validate, create the output directory and schedule.
    fn prepare(&self, request: &ExtractionRequest) -> Result<ExtractionPlan, VidframeError> {
        check_request(request)?;
        fs::create_dir_all(request.output_dir())?;
        let duration = self.probe(request.video_path())?;
        Ok(ExtractionPlan::new(request, duration))
    }
}

impl Default for FrameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// A running background extraction.
///
/// Dropping the handle detaches the worker; it keeps running until it
/// finishes or its token is cancelled.
#[derive(Debug)]
pub struct ExtractionHandle {
    token: CancellationToken,
    thread: JoinHandle<Result<ExtractionOutcome, VidframeError>>,
}

impl ExtractionHandle {
    /// Request cancellation. Takes effect before the next frame.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// The token controlling this run.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Whether the worker has returned.
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Wait for the worker and return its result.
    ///
    /// A panic on the worker thread is propagated to the caller.
    pub fn join(self) -> Result<ExtractionOutcome, VidframeError> {
        match self.thread.join() {
            Ok(result) => result,
            Err(payload) => std::panic::resume_unwind(payload),
        }
    }
}

/// Marks an extractor busy for as long as it lives.
pub(crate) struct ActiveRun(Arc<AtomicBool>);

impl ActiveRun {
    pub(crate) fn acquire(flag: &Arc<AtomicBool>) -> Result<Self, VidframeError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| VidframeError::ExtractionInProgress)?;
        Ok(Self(Arc::clone(flag)))
    }
}

impl Drop for ActiveRun {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
