//! Request validation.
//!
//! [`check_request`] performs the checks an extraction needs before any
//! work starts and fails on the first problem. [`FrameExtractor::validate`]
//! goes further: it probes the video and returns a [`ValidationReport`]
//! describing what a run would do and anything worth a second look.
//!
//! # Example
//!
//! ```no_run
//! use vidframe::{ExtractionRequest, FrameExtractor};
//!
//! let request = ExtractionRequest::new("input.mp4", "frames").with_interval(1);
//! let report = FrameExtractor::new().validate(&request);
//! if report.is_valid() {
//!     println!("ready");
//! } else {
//!     print!("{report}");
//! }
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::Path;

use log::warn;

use crate::configuration::{ExtractionRequest, MAX_INTERVAL, MIN_INTERVAL};
use crate::error::VidframeError;
use crate::extractor::FrameExtractor;
use crate::hardware_acceleration::HardwareAccelerationMethod;
use crate::schedule::{ExtractionPlan, MAX_DISTINCT_PADDED_FRAMES};

/// Container extensions the tool is commonly fed; others only warn.
const KNOWN_VIDEO_EXTENSIONS: [&str; 4] = ["mp4", "mkv", "avi", "mov"];

/// Summary of a pre-flight check.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Informational notices (not problems).
    pub info: Vec<String>,
    /// Issues that do not prevent a run but may surprise.
    pub warnings: Vec<String>,
    /// Issues that will make the run fail.
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// Returns `true` if no errors were found.
    ///
    /// Warnings do not affect this result.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total number of entries (info + warnings + errors).
    pub fn issue_count(&self) -> usize {
        self.info.len() + self.warnings.len() + self.errors.len()
    }
}

impl Display for ValidationReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for item in &self.info {
            writeln!(f, "[INFO] {item}")?;
        }
        for item in &self.warnings {
            writeln!(f, "[WARN] {item}")?;
        }
        for item in &self.errors {
            writeln!(f, "[ERROR] {item}")?;
        }
        if self.issue_count() == 0 {
            writeln!(f, "No issues found.")?;
        }
        Ok(())
    }
}

/// Fail if `path` is empty or does not exist.
pub(crate) fn check_video(path: &Path) -> Result<(), VidframeError> {
    if path.as_os_str().is_empty() || !path.exists() {
        return Err(VidframeError::VideoNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Fail if no output directory was given.
pub(crate) fn check_output_dir(path: &Path) -> Result<(), VidframeError> {
    if path.as_os_str().is_empty() {
        return Err(VidframeError::MissingOutputDirectory);
    }
    Ok(())
}

/// Checks every extraction runs before touching the file system.
pub(crate) fn check_request(request: &ExtractionRequest) -> Result<(), VidframeError> {
    check_video(request.video_path())?;
    check_output_dir(request.output_dir())?;

    let interval = request.interval();
    if !(MIN_INTERVAL..=MAX_INTERVAL).contains(&interval) {
        return Err(VidframeError::InvalidInterval(interval));
    }
    Ok(())
}

impl FrameExtractor {
    /// Check `request` and describe the run it would produce.
    ///
    /// Never fails: problems are reported as entries of the returned
    /// report. The video is probed, but nothing is written.
    pub fn validate(&self, request: &ExtractionRequest) -> ValidationReport {
        let mut report = ValidationReport::default();

        if let Err(error) = check_request(request) {
            report.errors.push(error.to_string());
            return report;
        }

        let extension = request
            .video_path()
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase());
        match extension {
            Some(ext) if KNOWN_VIDEO_EXTENSIONS.contains(&ext.as_str()) => {}
            _ => report.warnings.push(format!(
                "{} does not look like a video file (expected one of {})",
                request.video_path().display(),
                KNOWN_VIDEO_EXTENSIONS.join(", ")
            )),
        }

        if !request.hardware_acceleration
            && request.hardware_method != HardwareAccelerationMethod::default()
        {
            report.warnings.push(format!(
                "Hardware method {} is ignored because acceleration is disabled",
                request.hardware_method
            ));
        }

        if !request.output_dir().exists() {
            report.info.push(format!(
                "Output directory {} will be created",
                request.output_dir().display()
            ));
        }

        let duration = match self.probe(request.video_path()) {
            Ok(duration) => duration,
            Err(error) => {
                report.errors.push(error.to_string());
                return report;
            }
        };

        let plan = ExtractionPlan::new(request, duration);
        report.info.push(format!("Duration: {:.2}s", duration.as_secs_f64()));
        report.info.push(format!(
            "Frames: {} (every {}s, {} at {})",
            plan.frame_count(),
            request.interval(),
            request.format(),
            request.resolution()
        ));

        if plan.is_empty() {
            report.warnings.push(format!(
                "Interval of {}s is longer than the video; no frames will be extracted",
                request.interval()
            ));
        }
        if plan.frame_count() > MAX_DISTINCT_PADDED_FRAMES {
            report.warnings.push(format!(
                "{} frames exceed the three-digit index; names past {} will not sort in order",
                plan.frame_count(),
                MAX_DISTINCT_PADDED_FRAMES - 1
            ));
        }

        if let Some(existing) = plan.frames().iter().find(|frame| frame.output_path.exists()) {
            let hint = if request.overwrite {
                "it will be replaced"
            } else {
                "that frame will fail unless overwriting is enabled"
            };
            report.warnings.push(format!(
                "{} already exists; {hint}",
                existing.output_path.display()
            ));
        }

        for warning in &report.warnings {
            warn!("{warning}");
        }
        report
    }
}
