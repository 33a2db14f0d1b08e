use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use qcount::persistence::TIME_FORMAT;
use qcount::{Counting, CounterConfig, FrameProcessor, ReplayDetector, SharedSession};

#[derive(Parser, Debug)]
#[command(name = "qcount", about = "Count tracked objects crossing a line")]
struct Args {
    /// Recorded tracker output, one JSON frame per line
    #[arg(long, value_name = "PATH")]
    detections: PathBuf,
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Overrides the log path from the config
    #[arg(long, value_name = "PATH")]
    log: Option<PathBuf>,
    /// Frames to process, defaults to one pass over the dump
    #[arg(long)]
    frames: Option<usize>,
    /// Overrides how many log rows are printed
    #[arg(long)]
    recent: Option<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qcount=info".into()),
        )
        .with_target(false)
        .init();

    run(Args::parse())
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => CounterConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => CounterConfig::default(),
    };
    if let Some(log) = args.log {
        config.log_path = log;
    }
    if let Some(recent) = args.recent {
        config.recent_rows = recent;
    }

    let detector = ReplayDetector::open(&args.detections)
        .with_context(|| format!("Failed to read detections: {}", args.detections.display()))?;
    let frames = args.frames.unwrap_or_else(|| detector.len());

    let mut session = SharedSession::new(config.session().context("Invalid counting line")?);
    let mut processor = FrameProcessor::new(detector, session.clone(), config.class_map());

    session.start();

    for _ in 0..frames {
        if processor.step()?.is_none() {
            break;
        }
    }

    let persisted = session.stop().context("Failed to persist session counts")?;
    info!(frames, persisted, "session finished");

    println!("Session counts:");
    for (class_name, count) in &session.current_counts() {
        println!("  {}: {}", class_name, count);
    }

    println!("Recent sessions ({}):", config.log_path.display());
    for record in session.recent_log(config.recent_rows)? {
        println!(
            "  {},{},{}",
            record.class_name,
            record.count,
            record.start_time.format(TIME_FORMAT)
        );
    }

    Ok(())
}
