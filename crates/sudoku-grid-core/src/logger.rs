//! Stderr logging for the command line and examples.
//!
//! Lines look like `[   1.204s DEBUG sudoku_grid::merge] merged 12 of 31 ...`.
//! The `SUDOKU_GRID_LOG` environment variable (`error` .. `trace`, `off`)
//! overrides the level passed by the caller.

use std::io::Write;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, fmt::format::FmtSpan, EnvFilter};

const LEVEL_ENV: &str = "SUDOKU_GRID_LOG";

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

struct StderrLogger {
    max: LevelFilter,
    t0: Instant,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let t = self.t0.elapsed();
            let _ = writeln!(
                std::io::stderr().lock(),
                "[{:>4}.{:03}s {:<5} {}] {}",
                t.as_secs(),
                t.subsec_millis(),
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

fn env_level() -> Option<LevelFilter> {
    let raw = std::env::var(LEVEL_ENV).ok()?;
    LevelFilter::from_str(raw.trim()).ok()
}

/// Install the stderr logger at `level` (unless `SUDOKU_GRID_LOG` says
/// otherwise). Later calls are no-ops.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    let mut fresh = false;
    let logger = LOGGER.get_or_init(|| {
        fresh = true;
        StderrLogger {
            max: env_level().unwrap_or(level),
            t0: Instant::now(),
        }
    });
    if fresh {
        log::set_logger(logger)?;
        log::set_max_level(logger.max);
    }
    Ok(())
}

/// Install a `tracing` subscriber that closes spans with their timing.
///
/// Filtering follows `SUDOKU_GRID_LOG`, then `RUST_LOG`, then `info`.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_env(LEVEL_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::CLOSE);
    let installed = if json {
        builder.json().flatten_event(true).try_init()
    } else {
        builder.compact().try_init()
    };
    if installed.is_err() {
        log::debug!("tracing subscriber already installed");
    }
}
