//! # BARRAGE Stage Runner
//!
//! Runs a stage file headless and reports how hard the pool was pushed.
//!
//! ```text
//! barrage [STAGE_FILE] [--seconds N] [--tick-ms N]
//! ```
//!
//! Bullets drift in the direction their kind names until they leave the
//! stage region.

use std::process::ExitCode;
use std::time::Duration;

use barrage::cli::{RunArgs, DEFAULT_TICK};
use barrage::{kinds_in_use, telemetry, BulletPool, Stage, StageConfig, StageError};
use barrage_shared::{BulletKind, Vec2};

const DRIFT_SPEED: f32 = 6.0;

fn print_usage() {
    println!("Usage: barrage [STAGE_FILE] [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -s, --seconds <SECS>   Stop looping spawners after SECS");
    println!(
        "  -t, --tick-ms <MS>     Tick length in milliseconds (default: {})",
        DEFAULT_TICK.as_millis()
    );
    println!("  -h, --help             Show this help");
    println!();
    println!("Log filter is read from {} (default: info).", telemetry::LOG_ENV);
}

/// Unit direction of travel for each kind.
fn heading(kind: BulletKind) -> Vec2 {
    const D: f32 = std::f32::consts::FRAC_1_SQRT_2;
    match kind {
        BulletKind::Hamon | BulletKind::SUpEDown => Vec2::new(0.0, -1.0),
        BulletKind::SLeftERight => Vec2::new(1.0, 0.0),
        BulletKind::SRightELeft => Vec2::new(-1.0, 0.0),
        BulletKind::SDownEUp => Vec2::new(0.0, 1.0),
        BulletKind::BottomLeft => Vec2::new(D, D),
        BulletKind::BottomRight => Vec2::new(-D, D),
        BulletKind::TopLeft => Vec2::new(D, -D),
        BulletKind::TopRight => Vec2::new(-D, -D),
    }
}

fn drift(pool: &BulletPool, dt: Duration) {
    let step = DRIFT_SPEED * dt.as_secs_f32();
    for entry in pool.snapshot().into_iter().filter(|e| e.active) {
        pool.set_position(entry.handle, entry.position + heading(entry.kind) * step);
    }
}

fn run(args: &RunArgs) -> Result<(), StageError> {
    let config = StageConfig::from_file(&args.stage)?;
    let kinds: Vec<_> = kinds_in_use(&config).into_iter().map(BulletKind::name).collect();
    tracing::info!("Stage {} uses kinds: {}", args.stage, kinds.join(", "));
    let stage = Stage::build(config)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .map_err(|e| StageError::Runtime(e.to_string()))?;

    if args.limit.is_none() && stage.spawners().iter().any(|s| s.looping()) {
        tracing::warn!("Stage has looping spawners and no --seconds; running until interrupted");
    }
    let summary = runtime.block_on(stage.run(args.limit, args.tick, drift))?;

    println!("┌─ SPAWNERS ──────────────────────────────────────────────────────┐");
    for report in &summary.reports {
        println!(
            "│ {:<20} {:>5} spawned {:>4} skipped {:>4} cycles  {:?}",
            report.name, report.acquisitions, report.skipped, report.cycles, report.outcome
        );
    }
    println!("├─ POOL ──────────────────────────────────────────────────────────┤");
    println!("│ Entries:            {}", summary.stats.total);
    println!("│ Grown:              {}", summary.stats.grown);
    println!("│ Active at end:      {}", summary.stats.active);
    println!("│ Released:           {}", summary.released);
    println!("│ Bullets built:      {}", stage.bullets_created());
    println!("│ Exhaustions:        {}", summary.exhausted);
    println!("└─────────────────────────────────────────────────────────────────┘");

    match summary.failures.into_iter().next() {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

fn main() -> ExitCode {
    telemetry::init("info");

    let args = match RunArgs::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            tracing::error!("{msg}");
            print_usage();
            return ExitCode::from(2);
        }
    };
    if args.help {
        print_usage();
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
