use std::time::Duration;
use tracing::{info, warn};

/// Days of simulated history before today (the series has one extra bar for today).
pub const HISTORY_DAYS: usize = 30;
/// Days projected forward by the forecast chain.
pub const FORECAST_DAYS: usize = 30;
/// Base price used when no stock is selected or the price is unusable.
pub const DEFAULT_BASE_PRICE: f64 = 150.0;
pub const PROGRESS_COMPLETE: f64 = 100.0;
/// Interval between training ticks.
pub const TRAINING_TICK_MS: u64 = 200;
pub const MAX_TRAINING_IMAGES: usize = 20;
pub const IMAGE_PREVIEW_COUNT: usize = 8;
/// Entries per mover list in `--list` output.
pub const MOVERS_TOP_N: usize = 5;
/// Rows shown in the prediction table.
pub const PREDICTION_TABLE_ROWS: usize = 10;
/// Shortest tick interval accepted from the environment or CLI.
pub const MIN_TICK_MS: u64 = 10;

pub const TICK_MS_ENV: &str = "SYNTHSTOCK_TICK_MS";
pub const SEED_ENV: &str = "SYNTHSTOCK_SEED";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub tick_interval: Duration,
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(TRAINING_TICK_MS),
            seed: None,
        }
    }
}

impl AppConfig {
    /// Reads overrides from the process environment (after `.env` is loaded).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(raw) = lookup(TICK_MS_ENV) {
            match parse_tick_ms(&raw) {
                Some(ms) => cfg.tick_interval = Duration::from_millis(ms),
                None => warn!(
                    "Invalid {}={} ; keeping {} ms. Use an integer >= {}",
                    TICK_MS_ENV, raw, TRAINING_TICK_MS, MIN_TICK_MS
                ),
            }
        }

        if let Some(raw) = lookup(SEED_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(seed) => cfg.seed = Some(seed),
                Err(_) => warn!("Invalid {}={} ; using an unseeded generator", SEED_ENV, raw),
            }
        }

        cfg
    }

    /// CLI flags take precedence over the environment.
    pub fn with_overrides(mut self, tick_ms: Option<u64>, seed: Option<u64>) -> Self {
        if let Some(ms) = tick_ms {
            if ms >= MIN_TICK_MS {
                self.tick_interval = Duration::from_millis(ms);
            } else {
                warn!("--tick-ms {} is below {} ms; ignoring", ms, MIN_TICK_MS);
            }
        }
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    pub fn log_summary(&self) {
        info!(
            "Config: tick={} ms, seed={}",
            self.tick_interval.as_millis(),
            self.seed.map(|s| s.to_string()).unwrap_or_else(|| "entropy".to_string())
        );
    }
}

fn parse_tick_ms(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|ms| *ms >= MIN_TICK_MS)
}

pub fn log_dir() -> std::path::PathBuf {
    std::path::PathBuf::from("log")
}
