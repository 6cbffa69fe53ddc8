use std::sync::Arc;

use argus_predictor::GapCompensator;
use argus_runner::{
    EventFeed, ReplayPipeline, ReplayScheduler, RunnerConfig, SlotPublisher, SlotStore,
};
use tokio::sync::watch;

fn print_help() {
    eprintln!(
        r#"Argus - sliced-order flow detector and momentum forecaster

USAGE:
    argus [OPTIONS]

OPTIONS:
    --config <PATH>     Load configuration from JSON file
    --speed <F64>       Replay speed multiplier, 1.0-100.0 (default: 1.0)
    --input <PATH>      Event log to replay (default: stdin)
    --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG            Log level filter

EXAMPLES:
    # Replay a day's log at 5x
    argus --input 2024_05_17_trades.jsonl --speed 5

    # Pipe from an upstream normalizer in real time
    normalizer | argus
"#
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;
    let mut speed_override: Option<f64> = None;
    let mut input_override: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a path argument");
                    std::process::exit(1);
                }
                config_path = Some(args[i].clone());
            }
            "--speed" | "-s" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --speed requires a number argument");
                    std::process::exit(1);
                }
                match args[i].parse::<f64>() {
                    Ok(speed) => speed_override = Some(speed),
                    Err(_) => {
                        eprintln!("Error: invalid speed value: {}", args[i]);
                        std::process::exit(1);
                    }
                }
            }
            "--input" | "-i" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --input requires a path argument");
                    std::process::exit(1);
                }
                input_override = Some(args[i].clone());
            }
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let mut config = if let Some(path) = config_path {
        log::info!("Loading configuration from: {}", path);
        RunnerConfig::from_file(&path)?
    } else {
        RunnerConfig::default()
    };
    if let Some(speed) = speed_override {
        config.speed_multiplier = speed;
    }
    if let Some(input) = input_override {
        config.input = Some(input.into());
    }

    log::info!("Detection window: {}s", config.detector.window_seconds);
    log::info!("Min occurrences: {}", config.detector.min_occurrences);
    log::info!("Volume threshold: {}", config.detector.volume_threshold);
    log::info!(
        "Prediction interval: {}ms, horizon: {}min",
        config.detector.prediction_interval_ms,
        config.horizon_minutes
    );
    log::info!("Replay speed: {}x (timestamp-based)", config.speed_multiplier);

    // Load the event log; an unreadable source is the one fatal input error
    let feed = match &config.input {
        Some(path) => EventFeed::from_path(path, config.session_cutoff)?,
        None => {
            log::info!("[feed] reading from stdin");
            EventFeed::from_reader(std::io::stdin(), config.session_cutoff)?
        }
    };

    // Assemble the single-writer pipeline
    let store = SlotStore::new();
    let publisher = Arc::new(SlotPublisher::new(store.clone()));
    let mut pipeline = ReplayPipeline::new(
        config.detector.clone(),
        GapCompensator::new(config.gap),
        config.horizon_minutes,
        publisher,
    );

    // Ctrl-C flips the shutdown flag; the scheduler stops between events
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("Interrupt received, stopping replay");
            let _ = shutdown_tx.send(true);
        }
    });

    let scheduler = ReplayScheduler::new(config.speed_multiplier);
    let stats = scheduler.run(feed.events(), &mut pipeline, shutdown_rx).await;

    log::info!("============================================================");
    log::info!("Replay statistics:");
    log::info!("  Events delivered: {}", stats.events_delivered);
    log::info!("  Records produced: {}", stats.records_produced);
    log::info!("  Publish failures: {}", pipeline.publish_failures());
    log::info!("  Keys tracked: {}", pipeline.detector().tracked_keys());
    log::info!("  Runtime: {:.1}s", stats.wall_elapsed_ms as f64 / 1000.0);
    log::info!(
        "  Outcome: {}",
        if stats.cancelled { "cancelled" } else { "stream end" }
    );
    log::info!("============================================================");

    // Graceful stream end and cancellation both exit 0
    Ok(())
}
