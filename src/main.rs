//! Replays a recorded hand tracking session and prints actions and item events.

use anyhow::{Context, Result};
use clap::Parser;
use hand_action_tracking::{
    action::ActionType,
    config::{Config, EXAMPLE_CONFIG},
    pipeline::{FramePipeline, FrameReport},
    session::Session,
};
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Recorded session file (YAML)
    #[arg(required_unless_present = "print_config")]
    session: Option<PathBuf>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<PathBuf>,

    /// Only print item events, not hand actions
    #[arg(long)]
    events_only: bool,

    /// Print an example configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn print_report(report: &FrameReport, events_only: bool) {
    if !events_only {
        for result in report.gestures.iter().filter(|r| r.action_type != ActionType::None) {
            println!(
                "[{:>8} ms] {} {} {} ({:.2}, corr {:.2}) -> {}",
                report.timestamp_ms,
                result.hand_id,
                result.handedness,
                result.primary_gesture,
                result.gesture_confidence,
                result.motion_correlation,
                result.action_type
            );
        }
    }
    for event in &report.item_events {
        println!("[{:>8} ms] {}", report.timestamp_ms, event);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if args.print_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            Config::from_file(path).with_context(|| format!("Failed to load config {}", path.display()))?
        }
        None => Config::default(),
    };
    config.validate().context("Invalid configuration")?;

    let session_path = args.session.context("No session file given")?;
    info!("Replaying session: {}", session_path.display());
    let session = Session::from_file(&session_path)
        .with_context(|| format!("Failed to load session {}", session_path.display()))?;
    info!(
        "{} frames covering {} ms",
        session.frames.len(),
        session.duration_ms()
    );

    let mut pipeline = FramePipeline::new(config);
    let summary = pipeline.run_session(&session, |report| print_report(report, args.events_only));

    println!(
        "{} frames, {} pickups, {} releases, {} disposed, {} lost, {} items still tracked",
        summary.frames,
        summary.pickups,
        summary.releases,
        summary.disposed,
        summary.lost,
        pipeline.object_tracker().len()
    );

    Ok(())
}
