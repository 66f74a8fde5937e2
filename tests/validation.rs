//! Validation report tests against a scripted tool.

mod common;

use std::sync::Arc;

use vidframe::{ExtractionRequest, FrameExtractor, HardwareAccelerationMethod};

use common::{ScriptedRunner, Workspace, write_png};

fn extractor(seconds: u64) -> FrameExtractor {
    FrameExtractor::with_runner(Arc::new(ScriptedRunner::with_duration(seconds)))
}

#[test]
fn validate_normal_request() {
    let workspace = Workspace::new();
    let request = ExtractionRequest::new(workspace.video(), workspace.output()).with_interval(30);

    let report = extractor(95).validate(&request);

    assert!(report.is_valid(), "{report}");
    assert!(report.warnings.is_empty(), "{report}");
    assert!(report.info.iter().any(|line| line == "Duration: 95.00s"));
    assert!(report.info.iter().any(|line| line.starts_with("Frames: 3 ")));
    assert!(report.info.iter().any(|line| line.contains("will be created")));
    // Nothing is written while validating.
    assert!(!workspace.output().exists());
}

#[test]
fn validate_missing_video() {
    let workspace = Workspace::new();
    let request = ExtractionRequest::new(workspace.dir.path().join("gone.mp4"), workspace.output());

    let report = extractor(95).validate(&request);

    assert!(!report.is_valid());
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].starts_with("Please select a valid video file"));
    assert!(report.to_string().contains("[ERROR]"));
}

#[test]
fn validate_interval_out_of_range() {
    let workspace = Workspace::new();
    let request = ExtractionRequest::new(workspace.video(), workspace.output()).with_interval(900);

    let report = extractor(95).validate(&request);
    assert_eq!(
        report.errors,
        ["Interval must be between 1 and 600 seconds (got 900)"]
    );
}

#[test]
fn validate_unknown_duration() {
    let workspace = Workspace::new();
    let extractor = FrameExtractor::with_runner(Arc::new(ScriptedRunner::with_probe_output(
        "moov atom not found\n",
    )));
    let request = ExtractionRequest::new(workspace.video(), workspace.output());

    let report = extractor.validate(&request);
    assert!(!report.is_valid());
    assert!(report.errors[0].starts_with("Couldn't determine video duration"));
}

#[test]
fn validate_warns_about_empty_plan() {
    let workspace = Workspace::new();
    let request = ExtractionRequest::new(workspace.video(), workspace.output()).with_interval(30);

    let report = extractor(10).validate(&request);
    assert!(report.is_valid());
    assert!(report.warnings.iter().any(|line| line.contains("no frames")));
}

#[test]
fn validate_warns_past_a_thousand_frames() {
    let workspace = Workspace::new();
    let request = ExtractionRequest::new(workspace.video(), workspace.output()).with_interval(1);

    let report = extractor(1001).validate(&request);
    assert!(report.is_valid());
    assert!(report.warnings.iter().any(|line| line.starts_with("1001 frames")));

    let report = extractor(1000).validate(&request);
    assert!(report.warnings.is_empty(), "{report}");
}

#[test]
fn validate_warns_about_unusual_extension() {
    let workspace = Workspace::new();
    let video = workspace.dir.path().join("clip.webm");
    std::fs::write(&video, b"").unwrap();
    let request = ExtractionRequest::new(&video, workspace.output());

    let report = extractor(60).validate(&request);
    assert!(report.is_valid());
    assert!(report.warnings.iter().any(|line| line.contains("does not look like a video")));
}

#[test]
fn validate_warns_about_ignored_hardware_method() {
    let workspace = Workspace::new();
    let request = ExtractionRequest::new(workspace.video(), workspace.output())
        .with_hardware_method(HardwareAccelerationMethod::Vulkan);

    let report = extractor(60).validate(&request);
    assert!(report.warnings.iter().any(|line| line.contains("vulkan is ignored")));

    let report = extractor(60).validate(&request.with_hardware_acceleration(true));
    assert!(report.warnings.is_empty(), "{report}");
}

#[test]
fn validate_warns_about_existing_frames() {
    let workspace = Workspace::new();
    std::fs::create_dir_all(workspace.output()).unwrap();
    write_png(&workspace.output().join("frame_001.png"));
    let request = ExtractionRequest::new(workspace.video(), workspace.output());

    let report = extractor(60).validate(&request);
    assert!(report.warnings.iter().any(|line| line.contains("unless overwriting")));

    let report = extractor(60).validate(&request.with_overwrite(true));
    assert!(report.warnings.iter().any(|line| line.contains("will be replaced")));
}

#[test]
fn report_display_format() {
    let workspace = Workspace::new();
    let request = ExtractionRequest::new(workspace.video(), workspace.output()).with_interval(30);
    let report = extractor(10).validate(&request);

    let text = report.to_string();
    assert!(text.lines().any(|line| line.starts_with("[INFO] Duration:")));
    assert!(text.lines().any(|line| line.starts_with("[WARN] ")));
    assert_eq!(report.issue_count(), text.lines().count());
}
