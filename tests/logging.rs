//! Diagnostic log records written during an extraction.
//!
//! Installs the global logger, so this file holds a single test.

mod common;

use std::fs;
use std::sync::Arc;

use log::LevelFilter;
use vidframe::logging::init_file_logger;
use vidframe::{
    CancellationToken, ExtractionOutcome, ExtractionRequest, FrameExtractor, NoOpObserver,
};

use common::{ScriptedRunner, Workspace};

#[test]
fn failed_frame_is_logged_with_index_and_tool_output() {
    let workspace = Workspace::new();
    let log_path = workspace.dir.path().join("Logs").join("log.log");
    init_file_logger(&log_path, LevelFilter::Info).unwrap();

    let runner = Arc::new(ScriptedRunner::with_duration(95).failing_at(1));
    let request = ExtractionRequest::new(workspace.video(), workspace.output()).with_interval(30);

    let outcome = FrameExtractor::with_runner(runner)
        .extract(&request, &NoOpObserver, &CancellationToken::new())
        .unwrap();
    log::logger().flush();

    let ExtractionOutcome::Completed(summary) = outcome else {
        panic!("expected completion");
    };
    assert_eq!(summary.failed_frames, [1]);

    let text = fs::read_to_string(&log_path).unwrap();
    let failures: Vec<&str> = text
        .lines()
        .filter(|line| line.contains(" - ERROR - "))
        .collect();
    assert_eq!(failures.len(), 1, "{text}");
    assert!(
        failures[0].ends_with(
            "Error on extracting frame 1: Invalid data found when processing frame 1"
        ),
        "{text}"
    );
    assert!(
        text.lines()
            .any(|line| line.contains(" - INFO - Extraction completed.")),
        "{text}"
    );
}
