//! Async event streaming for extraction runs.
//!
//! [`EventStream`] exposes the notifications of one run as a
//! [`tokio_stream::Stream`] of [`ExtractionEvent`]s. The run itself stays
//! blocking: it executes on `tokio::task::spawn_blocking` and hands events
//! back through a bounded channel, so the runtime's worker threads never
//! wait on the tool.
//!
//! # Example
//!
//! ```no_run
//! use tokio_stream::StreamExt;
//!
//! use vidframe::{CancellationToken, ExtractionEvent, ExtractionRequest, FrameExtractor};
//!
//! # async fn example() -> Result<(), vidframe::VidframeError> {
//! let request = ExtractionRequest::new("input.mp4", "frames").with_interval(30);
//! let mut events = FrameExtractor::new().event_stream(request, CancellationToken::new())?;
//!
//! while let Some(event) = events.next().await {
//!     if let ExtractionEvent::Frame(path) = event {
//!         println!("wrote {}", path.display());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use std::io;
use std::path::Path;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::mpsc::{Receiver, Sender};
use tokio::task::JoinHandle;
use tokio_stream::Stream;

use crate::configuration::ExtractionRequest;
use crate::error::VidframeError;
use crate::extractor::{ActiveRun, ExtractionOutcome, ExtractionSummary, FrameExtractor};
use crate::progress::{CancellationToken, ExtractionEvent, ExtractionObserver, ExtractionProgress};

/// Default bounded-channel capacity for [`EventStream`].
const DEFAULT_CHANNEL_CAPACITY: usize = 8;

/// The events of one extraction run, in emission order.
///
/// The stream ends after the run's last event. Once the stream is dropped
/// the run notices at its next event and stops before the following frame.
pub struct EventStream {
    receiver: Receiver<ExtractionEvent>,
    token: CancellationToken,
    handle: JoinHandle<Result<ExtractionOutcome, VidframeError>>,
}

impl EventStream {
    /// Request cancellation of the underlying run.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Wait for the run to finish and return its result.
    ///
    /// Events not yet read are discarded.
    pub async fn outcome(self) -> Result<ExtractionOutcome, VidframeError> {
        let EventStream {
            receiver, handle, ..
        } = self;
        drop(receiver);
        match handle.await {
            Ok(result) => result,
            Err(join_error) if join_error.is_panic() => {
                std::panic::resume_unwind(join_error.into_panic())
            }
            Err(join_error) => Err(io::Error::other(join_error).into()),
        }
    }
}

impl Stream for EventStream {
    type Item = ExtractionEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}

/// Observer that feeds the bounded channel from the blocking thread.
struct StreamObserver {
    sender: Sender<ExtractionEvent>,
    token: CancellationToken,
}

impl StreamObserver {
    fn send(&self, event: ExtractionEvent) {
        // A closed channel means nobody is listening anymore.
        if self.sender.blocking_send(event).is_err() {
            self.token.cancel();
        }
    }
}

impl ExtractionObserver for StreamObserver {
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

impl FrameExtractor {
    /// Run `request` on Tokio's blocking pool and stream its events.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`VidframeError::ExtractionInProgress`] if this extractor is
    /// already running. Every other failure arrives as an
    /// [`ExtractionEvent::Failed`] and from [`EventStream::outcome`].
    pub fn event_stream(
        &self,
        request: ExtractionRequest,
        token: CancellationToken,
    ) -> Result<EventStream, VidframeError> {
        let guard = ActiveRun::acquire(&self.active)?;
        let (sender, receiver) = tokio::sync::mpsc::channel(DEFAULT_CHANNEL_CAPACITY);
        let observer = StreamObserver {
            sender,
            token: token.clone(),
        };
        let extractor = self.clone();
        let worker_token = token.clone();

        let handle = tokio::task::spawn_blocking(move || {
            let _guard = guard;
            extractor.run(&request, &observer, &worker_token)
        });

        Ok(EventStream {
            receiver,
            token,
            handle,
        })
    }
}
