use crate::config::{MAX_TRAINING_IMAGES, PROGRESS_COMPLETE};
use crate::rng::UniformSource;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingMetrics {
    pub accuracy: f64,
    pub loss: f64,
    pub epoch: u32,
    pub validation_accuracy: f64,
}

impl TrainingMetrics {
    pub fn from_progress(progress: f64) -> Self {
        let p = progress.clamp(0.0, PROGRESS_COMPLETE) / 100.0;
        Self {
            accuracy: (85.0 + p * 10.0).min(95.0),
            // Written from the floor up so a finished run lands on exactly 0.1.
            loss: (0.1 + 0.7 * (1.0 - p)).max(0.1),
            epoch: (progress.clamp(0.0, PROGRESS_COMPLETE) / 2.0).floor() as u32,
            validation_accuracy: (80.0 + p * 12.0).min(92.0),
        }
    }
}

/// Drives the fake training run. The ticker decides when `tick` is called;
/// the simulator only tracks where progress stands.
#[derive(Clone, Debug, Default)]
pub struct TrainingSimulator {
    progress: f64,
    running: bool,
    metrics: TrainingMetrics,
}

impl TrainingSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= PROGRESS_COMPLETE
    }

    pub fn metrics(&self) -> TrainingMetrics {
        self.metrics
    }

    /// Marks the run as active. A paused run resumes from its stored progress
    /// rather than restarting at zero; only a finished run starts over.
    pub fn start(&mut self) {
        if self.is_complete() {
            self.reset();
        }
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        self.progress = 0.0;
        self.running = false;
        self.metrics = TrainingMetrics::default();
    }

    /// Advances progress by up to two points. Returns `true` once progress is
    /// at 100; clearing the running flag is left to the caller.
    pub fn tick(&mut self, rng: &mut impl UniformSource) -> bool {
        if !self.running || self.is_complete() {
            return self.is_complete();
        }
        self.progress = (self.progress + rng.next_f64() * 2.0).min(PROGRESS_COMPLETE);
        self.metrics = TrainingMetrics::from_progress(self.progress);
        self.is_complete()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Algorithm {
    #[default]
    Lstm,
    RandomForest,
    Svm,
    Transformer,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Lstm,
        Algorithm::RandomForest,
        Algorithm::Svm,
        Algorithm::Transformer,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Lstm => "LSTM Neural Network",
            Self::RandomForest => "Random Forest",
            Self::Svm => "Support Vector Machine",
            Self::Transformer => "Transformer Network",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Lstm => "Long Short-Term Memory networks for time series prediction",
            Self::RandomForest => "Ensemble learning method for robust predictions",
            Self::Svm => "Advanced pattern recognition for market analysis",
            Self::Transformer => "State-of-the-art attention-based model",
        }
    }

    pub fn nominal_accuracy(self) -> &'static str {
        match self {
            Self::Lstm => "87.3%",
            Self::RandomForest => "82.1%",
            Self::Svm => "79.8%",
            Self::Transformer => "91.2%",
        }
    }

    pub fn train_time(self) -> &'static str {
        match self {
            Self::Lstm => "45-60 min",
            Self::RandomForest => "15-25 min",
            Self::Svm => "20-35 min",
            Self::Transformer => "90-120 min",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|a| *a == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

/// Image picks for a training run. Paths are only counted and listed; the
/// files are never opened.
#[derive(Clone, Debug, Default)]
pub struct TrainingImages {
    paths: Vec<PathBuf>,
}

impl TrainingImages {
    /// Appends paths up to the cap and returns how many were accepted.
    pub fn add<I, P>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let before = self.paths.len();
        let room = MAX_TRAINING_IMAGES.saturating_sub(before);
        self.paths
            .extend(paths.into_iter().take(room).map(|p| p.as_ref().to_path_buf()));
        self.paths.len() - before
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }

    /// File names of the first `limit` picks, plus how many were left out.
    pub fn preview(&self, limit: usize) -> (Vec<String>, usize) {
        let names = self
            .paths
            .iter()
            .take(limit)
            .map(|p| {
                p.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| p.display().to_string())
            })
            .collect();
        (names, self.paths.len().saturating_sub(limit))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tick {
    pub ticker_id: u64,
}

static NEXT_TICKER_ID: AtomicU64 = AtomicU64::new(1);

/// Owner side of a running ticker. Dropping or stopping it ends the task.
#[derive(Debug)]
pub struct TickerHandle {
    id: u64,
    task: JoinHandle<()>,
}

impl TickerHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// True when `tick` came from this handle's task.
    pub fn owns(&self, tick: &Tick) -> bool {
        tick.ticker_id == self.id
    }

    pub fn stop(self) {
        debug!("Stopping ticker {}", self.id);
        self.task.abort();
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub struct Ticker;

impl Ticker {
    /// Spawns a task that sends a [`Tick`] every `period` until stopped.
    /// Ticks already queued when the handle is stopped still carry the old
    /// id, so receivers filter them with [`TickerHandle::owns`].
    pub fn start(period: Duration, tx: UnboundedSender<Tick>) -> TickerHandle {
        let id = NEXT_TICKER_ID.fetch_add(1, Ordering::Relaxed);
        info!("Starting ticker {} every {} ms", id, period.as_millis());

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick of a tokio interval fires immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(Tick { ticker_id: id }).is_err() {
                    break;
                }
            }
        });

        TickerHandle { id, task }
    }
}
