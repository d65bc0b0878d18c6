//! pkwatch — live terminal monitor for single-dose concentration estimates.
//!
//! Resolves the model parameters from flags (prompting for anything
//! missing), assembles an immutable [`Settings`], then runs the monitor
//! loop until interrupted.

use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing::{debug, info, warn};

use pkwatch::input;
use pkwatch::model::Mode;
use pkwatch::monitor;
use pkwatch::settings::{poll_interval_from_secs, Settings};
use pkwatch::units::TimeUnit;

/// CLI arguments for the monitor.
#[derive(Debug, Parser)]
#[command(name = "pkwatch")]
#[command(version, about = "Live monitor for single-dose concentration estimates", long_about = None)]
struct Args {
    /// Precision in decimals (0-6) -- ineffective in probability mode.
    #[arg(short, long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=6))]
    precision: u8,

    /// Time unit for all time-valued inputs: (h)ours, (m)inutes, (s)econds.
    #[arg(long, default_value_t = TimeUnit::Hours, value_parser = TimeUnit::from_str)]
    unit: TimeUnit,

    /// Amount of chemical administered at time zero (units don't matter).
    #[arg(long)]
    dose: Option<f64>,

    /// Tmax of the chemical: time at which concentration peaks.
    #[arg(long)]
    tmax: Option<f64>,

    /// Absorption half-life of the chemical (default mode only).
    #[arg(long)]
    t12a: Option<f64>,

    /// Half-life of the chemical.
    #[arg(long)]
    t12: Option<f64>,

    /// Report the percentage of the dose statistically remaining.
    #[arg(long, conflicts_with = "linear")]
    probability: bool,

    /// Linear absorption/elimination (based on the elimination constant).
    #[arg(long)]
    linear: bool,

    /// Poll period of the monitor loop, in seconds.
    #[arg(long, default_value_t = 0.25)]
    interval: f64,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level)),
        )
        .init();

    // clap already rejects the flag conflict; this keeps the guard for
    // the library path too.
    let mode = Mode::from_flags(args.linear, args.probability)?;

    // Prompt for anything missing. The absorption half-life is only
    // meaningful to the default mode; the others never ask for it.
    let dose = input::resolve(args.dose, "Dose")?;
    let tmax = input::resolve(args.tmax, "Tmax")?;
    let absorption_half_life = if mode.uses_absorption_half_life() {
        input::resolve(args.t12a, "Absorption half-life")?
    } else {
        args.t12a.unwrap_or(0.0)
    };
    let half_life = input::resolve(args.t12, "Half-life")?;

    let settings = Settings::new(mode, dose, tmax, absorption_half_life, half_life, args.unit)
        .with_precision(args.precision)
        .with_poll_interval(poll_interval_from_secs(args.interval)?);
    settings.validate().context("invalid parameters")?;

    info!("pkwatch v{}", env!("CARGO_PKG_VERSION"));
    info!("starting monitor at {}", Local::now().format("%m/%d %H:%M:%S"));
    info!("mode: {}", settings.mode);
    info!("dose: {}", settings.dose);
    info!("tmax: {} {}", tmax, settings.unit);
    if settings.mode.uses_absorption_half_life() {
        info!("absorption half-life: {} {}", absorption_half_life, settings.unit);
    }
    info!("half-life: {} {}", half_life, settings.unit);
    debug!(
        "resolved settings: {}",
        serde_json::to_string(&settings).context("serializing settings")?
    );

    // Cooperative shutdown: the loop checks this flag every tick.
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        warn!("received interrupt, shutting down...");
        running_clone.store(false, Ordering::Relaxed);
    });

    monitor::run(&settings, running)
        .await
        .context("monitor loop failed")?;

    info!("monitor stopped");
    Ok(())
}
