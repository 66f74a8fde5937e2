use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;
use serde_json::json;
use vidframe::{
    CancellationToken, ChannelObserver, ExtractionEvent, ExtractionOutcome, ExtractionRequest,
    FfmpegLogLevel, FrameExtractor, HardwareAccelerationMethod, ImageFormat, ProcessRunner,
    QuickExtractRequest, Resolution, available_hardware_methods, frame_count,
    logging::{self, DEFAULT_LOG_FILE},
    preview_dimensions,
};

const CLI_AFTER_HELP: &str = "Examples:\n  vidframe extract input.mp4 --out frames --every 30 --format jpg --progress\n  vidframe quick input.mp4 --out snaps --at 01:15.5\n  vidframe probe input.mp4 --json\n  vidframe validate input.mp4 --out frames --every 1\n  vidframe completions zsh > _vidframe";

#[derive(Debug, Parser)]
#[command(
    name = "vidframe",
    version,
    about = "Extract still frames from videos at fixed intervals using ffmpeg",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Parser, Clone)]
struct GlobalOptions {
    /// Log every tool invocation and report each written frame.
    #[arg(long, global = true)]
    verbose: bool,

    /// Show a progress bar while extracting.
    #[arg(long, global = true)]
    progress: bool,

    /// Let ffmpeg replace existing output files (-y).
    #[arg(long, global = true)]
    overwrite: bool,

    /// Path to the ffmpeg executable (defaults to `ffmpeg` on PATH).
    #[arg(long, global = true)]
    ffmpeg: Option<PathBuf>,

    /// Diagnostic log file, appended to on every run.
    #[arg(long, global = true, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// ffmpeg log level (quiet, panic, fatal, error, warning, info, verbose, debug, trace).
    #[arg(long, global = true)]
    log_level: Option<String>,
}

/// Options shared by `extract` and `validate`.
#[derive(Debug, Args, Clone)]
struct ExtractArgs {
    /// Input video path.
    input: PathBuf,
    /// Output directory for extracted frames.
    #[arg(long)]
    out: PathBuf,
    /// Seconds between frames (1-600).
    #[arg(long, default_value_t = vidframe::DEFAULT_INTERVAL)]
    every: u32,
    /// Base name of the frame files.
    #[arg(long)]
    name: Option<String>,
    /// Output image format (png, jpg, bmp, tiff).
    #[arg(long, default_value = "png")]
    format: String,
    /// Output resolution (WIDTHxHEIGHT or 4K, 2K, 1080p, 720p, 640p, 480p).
    #[arg(long, default_value = "3840x2160")]
    resolution: String,
    /// Hardware decode method (cuda, dxva2, qsv, d3d11va, opencl, vulkan).
    #[arg(long)]
    hwaccel: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract one frame every N seconds.
    #[command(
        about = "Extract frames at a fixed interval",
        after_help = "Examples:\n  vidframe extract input.mp4 --out frames\n  vidframe extract input.mp4 --out frames --every 5 --name shot --resolution 720p --hwaccel cuda"
    )]
    Extract(ExtractArgs),

    /// Save a single PNG at a playback position.
    #[command(
        about = "Take a single snapshot",
        after_help = "Examples:\n  vidframe quick input.mp4 --out snaps --at 75\n  vidframe quick input.mp4 --out snaps --at 00:01:15.5"
    )]
    Quick {
        /// Input video path.
        input: PathBuf,
        /// Output directory for the snapshot.
        #[arg(long)]
        out: PathBuf,
        /// Position as seconds, MM:SS or HH:MM:SS(.fff).
        #[arg(long, default_value = "0")]
        at: String,
        /// Hardware decode method (cuda, dxva2, qsv, d3d11va, opencl, vulkan).
        #[arg(long)]
        hwaccel: Option<String>,
    },

    /// Print the duration of a video.
    #[command(
        about = "Print video duration",
        after_help = "Examples:\n  vidframe probe input.mp4\n  vidframe probe input.mp4 --json"
    )]
    Probe {
        /// Input video path.
        input: PathBuf,

        /// Output as machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// Check an extraction without running it.
    #[command(
        about = "Validate an extraction",
        after_help = "Examples:\n  vidframe validate input.mp4 --out frames --every 1"
    )]
    Validate(ExtractArgs),

    /// Generate shell completion scripts.
    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn parse_timecode(value: &str) -> Result<Duration, Box<dyn std::error::Error>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("time value cannot be empty".into());
    }

    let invalid = || vidframe::VidframeError::InvalidTimecode(trimmed.to_string());

    if let Ok(seconds) = trimmed.parse::<f64>() {
        if seconds.is_nan() {
            return Err(invalid().into());
        }
        return Ok(Duration::try_from_secs_f64(seconds.max(0.0)).map_err(|_| invalid())?);
    }

    let parts: Vec<&str> = trimmed.split(':').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return Err(invalid().into());
    }

    let (hours, minutes, seconds_str) = if parts.len() == 3 {
        (parts[0].parse::<u64>()?, parts[1].parse::<u64>()?, parts[2])
    } else {
        (0_u64, parts[0].parse::<u64>()?, parts[1])
    };

    let seconds = seconds_str.parse::<f64>()?;
    if seconds.is_nan() {
        return Err(invalid().into());
    }
    let total_seconds = (hours as f64 * 3600.0) + (minutes as f64 * 60.0) + seconds;
    Ok(Duration::try_from_secs_f64(total_seconds.max(0.0)).map_err(|_| invalid())?)
}

fn cancelled_message(frames_attempted: u64) -> String {
    format!(
        "{} {frames_attempted} frame(s) attempted",
        vidframe::CANCELLED_STATUS
    )
}

fn parse_hardware_method(
    value: Option<&str>,
) -> Result<Option<HardwareAccelerationMethod>, Box<dyn std::error::Error>> {
    Ok(value.map(str::parse::<HardwareAccelerationMethod>).transpose()?)
}

fn build_extractor(global: &GlobalOptions) -> FrameExtractor {
    let runner = match &global.ffmpeg {
        Some(program) => ProcessRunner::with_program(program.clone()),
        None => ProcessRunner::new(),
    };
    FrameExtractor::with_runner(Arc::new(runner))
}

fn build_request(
    args: &ExtractArgs,
    global: &GlobalOptions,
) -> Result<ExtractionRequest, Box<dyn std::error::Error>> {
    let mut request = ExtractionRequest::new(&args.input, &args.out)
        .with_interval(args.every)
        .with_format(args.format.parse::<ImageFormat>()?)
        .with_resolution(args.resolution.parse::<Resolution>()?)
        .with_overwrite(global.overwrite);

    if let Some(name) = &args.name {
        request = request.with_base_name(name.as_str());
    }
    if let Some(method) = parse_hardware_method(args.hwaccel.as_deref())? {
        request = request
            .with_hardware_acceleration(true)
            .with_hardware_method(method);
    }
    if let Some(level) = &global.log_level {
        request = request.with_log_level(level.parse::<FfmpegLogLevel>()?);
    }
    Ok(request)
}

fn print_preview(path: &Path) {
    match preview_dimensions(path) {
        Ok((width, height)) => eprintln!("preview {} ({width}x{height})", path.display()),
        Err(error) => eprintln!(
            "{} {}",
            "warning:".yellow().bold(),
            format!("cannot preview {}: {error}", path.display()).yellow()
        ),
    }
}

fn run_extraction(
    args: &ExtractArgs,
    global: &GlobalOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = build_request(args, global)?;
    let extractor = build_extractor(global);

    let token = CancellationToken::new();
    let interrupt = token.clone();
    ctrlc::set_handler(move || interrupt.cancel())?;

    let (observer, events) = ChannelObserver::new();
    let handle = extractor.spawn(request, Arc::new(observer), token)?;

    let progress_bar = if global.progress {
        let pb = ProgressBar::new(0);
        let style =
            ProgressStyle::with_template("{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}")?;
        pb.set_style(style.progress_chars("##-"));
        Some(pb)
    } else {
        None
    };

    // Ends once the worker drops its observer.
    for event in events.iter() {
        match event {
            ExtractionEvent::Progress(progress) => {
                if let Some(pb) = &progress_bar {
                    pb.set_length(progress.frame_count);
                    pb.set_position(progress.frames_created());
                    pb.set_message(progress.status_line());
                }
                if global.verbose {
                    let marker = if progress.succeeded { "saved" } else { "failed" };
                    eprintln!(
                        "{marker} frame {} at {}s -> {}",
                        progress.index,
                        progress.timestamp.as_secs(),
                        progress.output_path.display()
                    );
                }
            }
            ExtractionEvent::FirstFrame(path) if global.verbose => print_preview(&path),
            _ => {}
        }
    }

    let outcome = handle.join();
    if let Some(pb) = progress_bar {
        pb.finish_and_clear();
    }

    match outcome? {
        ExtractionOutcome::Completed(summary) => {
            println!(
                "{} {}",
                "success:".green().bold(),
                format!(
                    "Extracted {} frame(s) to {}",
                    summary.succeeded_frames(),
                    summary.output_dir.display()
                )
                .green()
            );
            if !summary.failed_frames.is_empty() {
                eprintln!(
                    "{} {}",
                    "warning:".yellow().bold(),
                    format!(
                        "{} frame(s) failed: {:?} (see {})",
                        summary.failed_frames.len(),
                        summary.failed_frames,
                        global.log_file.display()
                    )
                    .yellow()
                );
            }
        }
        ExtractionOutcome::Cancelled { frames_attempted } => {
            eprintln!(
                "{} {}",
                "warning:".yellow().bold(),
                cancelled_message(frames_attempted).yellow()
            );
        }
    }
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let level = if cli.global.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    logging::init_file_logger(&cli.global.log_file, level)?;
    logging::install_panic_hook();

    match &cli.command {
        Commands::Extract(args) => run_extraction(args, &cli.global)?,
        Commands::Quick {
            input,
            out,
            at,
            hwaccel,
        } => {
            let position = parse_timecode(at)?;
            let mut request = QuickExtractRequest::new(input, out, position)
                .with_overwrite(cli.global.overwrite);
            if let Some(method) = parse_hardware_method(hwaccel.as_deref())? {
                request = request.with_hardware_method(method);
            }

            let path = build_extractor(&cli.global).quick_extract(&request)?;
            if cli.global.verbose {
                print_preview(&path);
            }
            println!("{} {}", "saved".green().bold(), path.display());
        }
        Commands::Probe { input, json } => {
            let extractor = build_extractor(&cli.global);
            let duration = extractor.probe(input)?;
            let methods = available_hardware_methods(extractor.runner()).unwrap_or_default();
            let frames = frame_count(duration, vidframe::DEFAULT_INTERVAL);

            if *json {
                let payload = json!({
                    "path": input.display().to_string(),
                    "duration_seconds": duration.as_secs_f64(),
                    "frames_at_default_interval": frames,
                    "hardware_methods": methods.iter().map(|m| m.as_str()).collect::<Vec<_>>(),
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!("Duration: {:.2}s", duration.as_secs_f64());
                println!(
                    "Frames every {}s: {frames}",
                    vidframe::DEFAULT_INTERVAL
                );
                if !methods.is_empty() {
                    let names: Vec<&str> = methods.iter().map(|m| m.as_str()).collect();
                    println!("Hardware methods: {}", names.join(", "));
                }
            }
        }
        Commands::Validate(args) => {
            let request = build_request(args, &cli.global)?;
            let report = build_extractor(&cli.global).validate(&request);
            print!("{report}");
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(*shell, &mut command, "vidframe", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}
