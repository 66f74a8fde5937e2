//! Media duration probing.
//!
//! The tool prints a summary of its input to the diagnostic stream when it
//! is started with nothing but `-i <file>`:
//!
//! ```text
//! Input #0, mov,mp4,m4a,3gp,3g2,mj2, from 'input.mp4':
//!   Duration: 00:01:35.07, start: 0.000000, bitrate: 1205 kb/s
//! ```
//!
//! [`probe_duration`] runs exactly that and reads the `Duration:` line.
//! The tool exits unsuccessfully in this mode (no output file was given), so
//! the exit status is ignored.

use std::path::Path;
use std::time::Duration;

use log::{debug, error};

use crate::command::probe_args;
use crate::error::VidframeError;
use crate::runner::ToolRunner;

/// Probe the total duration of `video_path`.
///
/// # Errors
///
/// Returns [`VidframeError::ToolSpawn`] if the tool cannot be started and
/// [`VidframeError::DurationNotFound`] if its output carries no parsable
/// duration (for example `Duration: N/A` on a live stream or an unreadable
/// file).
///
/// # Example
///
/// ```no_run
/// use vidframe::{ProcessRunner, probe_duration};
///
/// let duration = probe_duration(&ProcessRunner::new(), "input.mp4".as_ref())?;
/// println!("{} seconds", duration.as_secs_f64());
/// # Ok::<(), vidframe::VidframeError>(())
/// ```
pub fn probe_duration(runner: &dyn ToolRunner, video_path: &Path) -> Result<Duration, VidframeError> {
    let output = runner.run(&probe_args(video_path))?;

    match parse_duration(&output.stderr) {
        Some(duration) => {
            debug!(
                "Probed duration of {}: {:.2}s",
                video_path.display(),
                duration.as_secs_f64()
            );
            Ok(duration)
        }
        None => {
            error!("Couldn't determine video duration of {}", video_path.display());
            Err(VidframeError::DurationNotFound {
                path: video_path.to_path_buf(),
            })
        }
    }
}

/// Probe several files. Files that cannot be probed produce an `Err` entry
/// rather than aborting the batch.
pub fn probe_many<P: AsRef<Path>>(
    runner: &dyn ToolRunner,
    paths: &[P],
) -> Vec<Result<Duration, VidframeError>> {
    paths
        .iter()
        .map(|path| probe_duration(runner, path.as_ref()))
        .collect()
}

/// Find the first `Duration:` line in the tool's diagnostic text whose
/// `HH:MM:SS.ss` value parses.
///
/// Container metadata is printed ahead of the real line and may itself
/// mention `Duration`; such lines are skipped when their value is not a
/// valid, representable clock time.
///
/// ```
/// use std::time::Duration;
///
/// let text = "  Duration: 00:01:35.50, start: 0.000000, bitrate: 1205 kb/s";
/// assert_eq!(vidframe::parse_duration(text), Some(Duration::from_secs_f64(95.5)));
/// ```
pub fn parse_duration(text: &str) -> Option<Duration> {
    text.lines()
        .filter(|line| line.contains("Duration"))
        .find_map(|line| {
            let (_, after_label) = line.split_once("Duration:")?;
            let value = after_label.split(',').next()?.trim();
            parse_clock(value)
        })
}

/// Parse `HH:MM:SS(.fff)` into a duration.
fn parse_clock(value: &str) -> Option<Duration> {
    let mut parts = value.split(':');
    let hours: u64 = parts.next()?.trim().parse().ok()?;
    let minutes: u64 = parts.next()?.trim().parse().ok()?;
    let seconds: f64 = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() || !seconds.is_finite() || seconds < 0.0 {
        return None;
    }

    let whole = hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?;
    Duration::try_from_secs_f64(whole as f64 + seconds).ok()
}
