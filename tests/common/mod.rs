//! Scripted stand-in for the ffmpeg executable.
//!
//! Probe calls answer with a canned banner; frame calls write a tiny PNG to
//! the requested output path unless told to fail.

#![allow(dead_code)]

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use vidframe::{ToolOutput, ToolRunner, VidframeError};

pub fn banner(duration: &str) -> String {
    format!(
        "ffmpeg version 6.1 Copyright (c) 2000-2023 the FFmpeg developers\n\
         Input #0, mov,mp4,m4a,3gp,3g2,mj2, from 'input.mp4':\n  \
         Duration: {duration}, start: 0.000000, bitrate: 1205 kb/s\n\
         At least one output file must be specified\n"
    )
}

pub struct ScriptedRunner {
    probe_stderr: String,
    fail_frames: Vec<u64>,
    hwaccels: String,
    frame_calls: AtomicU64,
    calls: Mutex<Vec<Vec<String>>>,
}

impl ScriptedRunner {
    /// A runner whose probe reports `seconds` of video.
    pub fn with_duration(seconds: u64) -> Self {
        let clock = format!(
            "{:02}:{:02}:{:02}.00",
            seconds / 3600,
            (seconds % 3600) / 60,
            seconds % 60
        );
        Self::with_probe_output(banner(&clock))
    }

    pub fn with_probe_output(stderr: impl Into<String>) -> Self {
        Self {
            probe_stderr: stderr.into(),
            fail_frames: Vec::new(),
            hwaccels: String::new(),
            frame_calls: AtomicU64::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fail the `n`th frame invocation (zero-based).
    pub fn failing_at(mut self, n: u64) -> Self {
        self.fail_frames.push(n);
        self
    }

    pub fn with_hwaccels(mut self, stdout: &str) -> Self {
        self.hwaccels = stdout.to_string();
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn frame_calls(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter(|args| args.iter().any(|arg| arg == "-vframes"))
            .collect()
    }
}

impl ToolRunner for ScriptedRunner {
    fn run(&self, args: &[OsString]) -> Result<ToolOutput, VidframeError> {
        let args: Vec<String> = args
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        self.calls.lock().unwrap().push(args.clone());

        if args.iter().any(|arg| arg == "-hwaccels") {
            return Ok(ToolOutput {
                success: true,
                exit_code: Some(0),
                stdout: self.hwaccels.clone(),
                stderr: String::new(),
            });
        }

        if !args.iter().any(|arg| arg == "-vframes") {
            return Ok(ToolOutput {
                success: false,
                exit_code: Some(1),
                stdout: String::new(),
                stderr: self.probe_stderr.clone(),
            });
        }

        let call = self.frame_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_frames.contains(&call) {
            return Ok(ToolOutput {
                success: false,
                exit_code: Some(1),
                stdout: String::new(),
                stderr: format!("Invalid data found when processing frame {call}"),
            });
        }

        let output = PathBuf::from(args.last().unwrap());
        write_png(&output);
        Ok(ToolOutput {
            success: true,
            exit_code: Some(0),
            ..ToolOutput::default()
        })
    }

    fn program(&self) -> &OsStr {
        OsStr::new("ffmpeg")
    }
}

pub fn write_png(path: &Path) {
    image::RgbImage::new(4, 2)
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

/// A temporary directory holding an (empty) `input.mp4`.
pub struct Workspace {
    pub dir: tempfile::TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("input.mp4"), b"").unwrap();
        Self { dir }
    }

    pub fn video(&self) -> PathBuf {
        self.dir.path().join("input.mp4")
    }

    pub fn output(&self) -> PathBuf {
        self.dir.path().join("frames")
    }

    pub fn written_files(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(self.output()) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}
