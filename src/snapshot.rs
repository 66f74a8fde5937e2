//! Single-frame snapshots.
//!
//! A quick extract captures one frame at a playback position, independent
//! of any batch run. The frame is always written as PNG, scaled to a height
//! of 1080 pixels with the width following the source aspect ratio.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, error, info};

use crate::command::FrameCommand;
use crate::configuration::QuickExtractRequest;
use crate::error::VidframeError;
use crate::extractor::FrameExtractor;
use crate::validation::{check_output_dir, check_video};

/// Output height of a snapshot. The width is derived by the tool.
const SNAPSHOT_HEIGHT: i64 = 1080;

impl FrameExtractor {
    /// Capture a single PNG frame at the request's position.
    ///
    /// This does not take the extractor's busy flag, so a snapshot can be
    /// taken while a batch run is in progress.
    ///
    /// # Errors
    ///
    /// - [`VidframeError::VideoNotFound`] or
    ///   [`VidframeError::MissingOutputDirectory`] for bad input.
    /// - [`VidframeError::IoError`] if the output directory cannot be
    ///   created.
    /// - [`VidframeError::ToolSpawn`] if the tool cannot be started.
    /// - [`VidframeError::ToolFailed`] with the tool's diagnostic text if
    ///   it ran but reported failure.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::time::Duration;
    /// use vidframe::{FrameExtractor, QuickExtractRequest};
    ///
    /// let request = QuickExtractRequest::new("input.mp4", "snaps", Duration::from_secs_f64(75.5));
    /// let path = FrameExtractor::new().quick_extract(&request)?;
    /// assert!(path.ends_with("snapshot_75.png"));
    /// # Ok::<(), vidframe::VidframeError>(())
    /// ```
    pub fn quick_extract(&self, request: &QuickExtractRequest) -> Result<PathBuf, VidframeError> {
        check_video(request.video_path())?;
        check_output_dir(request.output_dir())?;
        fs::create_dir_all(request.output_dir())?;

        let position = request.position_seconds();
        let command = FrameCommand::new(request.video_path(), request.output_path())
            .with_hardware_method(request.hardware_method)
            .with_overwrite(request.overwrite)
            .with_seek_seconds(position)
            .with_scale(-1, SNAPSHOT_HEIGHT)
            .with_codec("png");
        debug!("{} {command}", self.runner().program().to_string_lossy());

        let output = self.runner().run(&command.to_args())?;
        if !output.success {
            error!("Error on extracting snapshot at {position}s: {}", output.stderr.trim_end());
            return Err(VidframeError::ToolFailed {
                position,
                stderr: output.stderr,
            });
        }

        info!("Snapshot saved to {}", command.output().display());
        Ok(command.output().to_path_buf())
    }
}

/// Width and height of an image file, read from its header.
///
/// Used to describe a freshly written frame without decoding it.
pub fn preview_dimensions<P: AsRef<Path>>(path: P) -> Result<(u32, u32), VidframeError> {
    Ok(image::image_dimensions(path)?)
}

#[cfg(test)]
mod tests {
    use super::preview_dimensions;
    use crate::error::VidframeError;

    #[test]
    fn dimensions_of_a_written_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.png");
        image::RgbImage::new(7, 3).save(&path).unwrap();

        assert_eq!(preview_dimensions(&path).unwrap(), (7, 3));
    }

    #[test]
    fn missing_image_is_an_error() {
        let result = preview_dimensions("no/such/image.png");
        assert!(matches!(
            result,
            Err(VidframeError::ImageError(_) | VidframeError::IoError(_))
        ));
    }
}
