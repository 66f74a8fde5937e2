//! ExtractionRequest, QuickExtractRequest, ImageFormat and Resolution tests.

use std::path::Path;
use std::time::Duration;

use vidframe::{
    ExtractionRequest, FfmpegLogLevel, HardwareAccelerationMethod, ImageFormat,
    QuickExtractRequest, Resolution, VidframeError,
};

// ── ExtractionRequest builder ────────────────────────────────────

#[test]
fn request_debug_shows_defaults() {
    let request = ExtractionRequest::new("in.mp4", "out");
    let debug = format!("{request:?}");
    assert!(debug.contains("ExtractionRequest"));
    assert!(debug.contains("interval: 10"));
    assert!(debug.contains("overwrite: false"));
}

#[test]
fn request_paths_are_kept_verbatim() {
    let request = ExtractionRequest::new("videos/in.mp4", "frames/run 1");
    assert_eq!(request.video_path(), Path::new("videos/in.mp4"));
    assert_eq!(request.output_dir(), Path::new("frames/run 1"));
}

#[test]
fn out_of_range_interval_is_stored_for_validation() {
    // Rejected when a run starts, not when building.
    let request = ExtractionRequest::new("in.mp4", "out").with_interval(0);
    assert_eq!(request.interval(), 0);
}

#[test]
fn builder_chain() {
    let request = ExtractionRequest::new("in.mp4", "out")
        .with_interval(45)
        .with_base_name("still")
        .with_format(ImageFormat::Bmp)
        .with_resolution(Resolution::Qhd2k)
        .with_hardware_acceleration(true)
        .with_hardware_method(HardwareAccelerationMethod::D3d11va)
        .with_overwrite(true)
        .with_log_level(FfmpegLogLevel::Error);

    assert_eq!(request.interval(), 45);
    assert_eq!(request.base_name(), "still");
    assert_eq!(request.format(), ImageFormat::Bmp);
    assert_eq!(request.resolution().dimensions(), (2560, 1440));
    assert_eq!(
        request.hardware_method(),
        Some(HardwareAccelerationMethod::D3d11va)
    );
}

// ── ImageFormat ──────────────────────────────────────────────────

#[test]
fn image_format_extensions_and_encoders() {
    let pairs: Vec<(&str, &str)> = ImageFormat::ALL
        .iter()
        .map(|format| (format.extension(), format.encoder()))
        .collect();
    assert_eq!(
        pairs,
        [
            ("png", "png"),
            ("jpg", "mjpeg"),
            ("bmp", "bmp"),
            ("tiff", "tiff")
        ]
    );
}

#[test]
fn image_format_unknown_is_an_error() {
    let error = "gif".parse::<ImageFormat>().unwrap_err();
    assert!(matches!(error, VidframeError::UnsupportedFormat(ref value) if value == "gif"));
}

// ── Resolution ───────────────────────────────────────────────────

#[test]
fn resolution_presets() {
    let all: Vec<String> = Resolution::ALL.iter().map(ToString::to_string).collect();
    assert_eq!(
        all,
        [
            "3840x2160",
            "2560x1440",
            "1920x1080",
            "1280x720",
            "640x480",
            "854x480"
        ]
    );
    assert_eq!(Resolution::default(), Resolution::Uhd4k);
}

#[test]
fn resolution_labels_round_trip() {
    for resolution in Resolution::ALL {
        assert_eq!(resolution.label().parse::<Resolution>().unwrap(), resolution);
        assert_eq!(resolution.to_string().parse::<Resolution>().unwrap(), resolution);
    }
}

#[test]
fn resolution_unknown_is_an_error() {
    assert!(matches!(
        "123x456".parse::<Resolution>(),
        Err(VidframeError::UnsupportedResolution(_))
    ));
}

// ── QuickExtractRequest ──────────────────────────────────────────

#[test]
fn quick_request_accessors() {
    let request = QuickExtractRequest::new("in.mp4", "snaps", Duration::from_millis(1500));
    assert_eq!(request.video_path(), Path::new("in.mp4"));
    assert_eq!(request.output_dir(), Path::new("snaps"));
    assert_eq!(request.position(), Duration::from_millis(1500));
    assert_eq!(request.position_seconds(), 1.5);
    assert_eq!(request.output_path(), Path::new("snaps").join("snapshot_1.png"));
}
