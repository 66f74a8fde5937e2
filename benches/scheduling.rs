//! Benchmarks for the pure parts of an extraction: scheduling, command
//! building and duration parsing.
//!
//! Run with: cargo bench

use std::{hint::black_box, time::Duration};

use criterion::Criterion;
use vidframe::{ExtractionPlan, ExtractionRequest, ImageFormat, parse_duration};

const BANNER: &str = "\
ffmpeg version 6.1 Copyright (c) 2000-2023 the FFmpeg developers
Input #0, mov,mp4,m4a,3gp,3g2,mj2, from 'input.mp4':
  Metadata:
    major_brand     : isom
  Duration: 02:13:07.48, start: 0.000000, bitrate: 4305 kb/s
  Stream #0:0[0x1](und): Video: h264 (High), yuv420p, 1920x1080, 24 fps
At least one output file must be specified
";

fn benchmark_plan_construction(criterion: &mut Criterion) {
    let request = ExtractionRequest::new("input.mp4", "frames")
        .with_interval(1)
        .with_format(ImageFormat::Jpg);
    let duration = Duration::from_secs(2 * 3600);

    criterion.bench_function("plan 7200 frames (every 1s)", |bencher| {
        bencher.iter(|| ExtractionPlan::new(black_box(&request), black_box(duration)));
    });

    let request = request.with_interval(30);
    criterion.bench_function("plan 240 frames (every 30s)", |bencher| {
        bencher.iter(|| ExtractionPlan::new(black_box(&request), black_box(duration)));
    });
}

fn benchmark_command_building(criterion: &mut Criterion) {
    let request = ExtractionRequest::new("input.mp4", "frames").with_interval(10);
    let plan = ExtractionPlan::new(&request, Duration::from_secs(3600));

    criterion.bench_function("build 360 frame commands", |bencher| {
        bencher.iter(|| {
            plan.frames()
                .iter()
                .map(|frame| frame.command(&request).to_args().len())
                .sum::<usize>()
        });
    });
}

fn benchmark_duration_parsing(criterion: &mut Criterion) {
    criterion.bench_function("parse probe banner", |bencher| {
        bencher.iter(|| parse_duration(black_box(BANNER)));
    });
}

criterion::criterion_group!(
    benches,
    benchmark_plan_construction,
    benchmark_command_building,
    benchmark_duration_parsing,
);
criterion::criterion_main!(benches);
