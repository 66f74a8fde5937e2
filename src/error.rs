//! Error types for the `vidframe` crate.
//!
//! This module defines [`VidframeError`], the unified error type returned by
//! all fallible operations in the crate. Errors carry enough context (paths,
//! positions, the tool's diagnostic output) to be shown to a user as-is.

use std::{io::Error as IoError, path::PathBuf};

use image::ImageError;
use thiserror::Error;

/// The unified error type for all `vidframe` operations.
///
/// Per-frame tool failures during an interval extraction are **not**
/// surfaced through this type: they are logged and counted in the
/// [`ExtractionSummary`](crate::ExtractionSummary) while the run continues.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VidframeError {
    /// The video file does not exist or no path was given.
    #[error("Please select a valid video file (got {})", path.display())]
    VideoNotFound {
        /// Path that was supplied.
        path: PathBuf,
    },

    /// No output directory was specified.
    #[error("Please specify an output directory")]
    MissingOutputDirectory,

    /// The interval is outside the accepted range of whole seconds.
    #[error("Interval must be between 1 and 600 seconds (got {0})")]
    InvalidInterval(u32),

    /// The requested output image format is not one of the supported set.
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// The requested resolution is not one of the presets.
    #[error("Unsupported resolution: {0}")]
    UnsupportedResolution(String),

    /// The requested hardware acceleration method is not recognised.
    #[error("Unsupported hardware acceleration method: {0}")]
    UnsupportedHardwareMethod(String),

    /// A timecode string could not be parsed.
    #[error("Invalid timecode: {0}")]
    InvalidTimecode(String),

    /// The tool's diagnostic output contained no usable duration.
    #[error("Couldn't determine video duration of {}", path.display())]
    DurationNotFound {
        /// The probed video.
        path: PathBuf,
    },

    /// The external tool could not be started at all.
    #[error("Failed to run {program}: {reason}")]
    ToolSpawn {
        /// Program that was invoked.
        program: String,
        /// Underlying reason the spawn failed.
        reason: String,
    },

    /// A single-shot tool invocation exited unsuccessfully.
    #[error("Error on extracting snapshot at {position}s:\n{stderr}")]
    ToolFailed {
        /// Seek position of the failed invocation, in seconds.
        position: f64,
        /// The tool's diagnostic output.
        stderr: String,
    },

    /// Another extraction is already running on this extractor.
    #[error("An extraction is already in progress")]
    ExtractionInProgress,

    /// An I/O error occurred while preparing output directories or files.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// An error from the `image` crate while inspecting a written frame.
    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),
}
