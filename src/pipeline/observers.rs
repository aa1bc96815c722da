//! Observer pattern for training pipelines
//!
//! Observers allow composable data collection during training without coupling
//! the episode loop to specific output formats.

use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    Result,
    analysis::{EpisodeRecord, Summary, summarize},
    export::LearningCurve,
    gridworld::{Action, Position, StepEvent, Transition},
    ports::{Observer, RunKind},
};

/// Observation of a single step during an episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepObservation {
    /// Step number within episode
    pub step: usize,
    /// Agent position before the action
    pub state: Position,
    pub action: Action,
    pub reward: f64,
    pub next_state: Position,
    pub event: StepEvent,
}

/// Complete observation of an episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub kind: RunKind,
    pub episode: usize,
    pub success: bool,
    pub total_reward: f64,
    pub steps: Vec<StepObservation>,
}

/// Progress bar observer - Shows run progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    successes: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            successes: 0,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_run_start(&mut self, kind: RunKind, total_episodes: usize) -> Result<()> {
        let label = match kind {
            RunKind::Training => "training",
            RunKind::Evaluation => "evaluating",
            RunKind::Rollout => "rollout",
        };
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(&format!(
                    "[{{elapsed_precise}}] {{bar:40.cyan/blue}} {{pos}}/{{len}} {label} (goal: {{msg}})"
                ))
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.successes = 0;
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, record: &EpisodeRecord) -> Result<()> {
        if record.success {
            self.successes += 1;
        }
        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
            pb.set_message(self.successes.to_string());
        }
        Ok(())
    }

    fn on_run_end(&mut self) -> Result<()> {
        if let Some(pb) = self.progress_bar.take() {
            pb.finish_with_message(self.successes.to_string());
        }
        Ok(())
    }
}

/// Metrics observer - Tracks per-episode records and step events
///
/// Logs a summary at the end of every run.
#[derive(Debug, Default)]
pub struct MetricsObserver {
    kind: Option<RunKind>,
    records: Vec<EpisodeRecord>,
    events: BTreeMap<StepEvent, usize>,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[EpisodeRecord] {
        &self.records
    }

    /// How often each step outcome occurred
    pub fn event_counts(&self) -> &BTreeMap<StepEvent, usize> {
        &self.events
    }

    /// Summary of the episodes seen so far
    pub fn summary(&self) -> Result<Summary> {
        summarize(&self.records)
    }
}

impl Observer for MetricsObserver {
    fn on_run_start(&mut self, kind: RunKind, _total_episodes: usize) -> Result<()> {
        self.kind = Some(kind);
        self.records.clear();
        self.events.clear();
        Ok(())
    }

    fn on_step(
        &mut self,
        _episode: usize,
        _step: usize,
        _state: Position,
        _action: Action,
        transition: &Transition,
    ) -> Result<()> {
        *self.events.entry(transition.event).or_default() += 1;
        Ok(())
    }

    fn on_episode_end(&mut self, _episode: usize, record: &EpisodeRecord) -> Result<()> {
        self.records.push(*record);
        Ok(())
    }

    fn on_run_end(&mut self) -> Result<()> {
        if let Ok(summary) = self.summary() {
            let wall_hits = self.events.get(&StepEvent::HitWall).copied().unwrap_or(0);
            let obstacle_hits = self
                .events
                .get(&StepEvent::HitObstacle)
                .copied()
                .unwrap_or(0);
            info!(
                kind = ?self.kind,
                episodes = summary.episodes,
                success_rate = summary.success_rate,
                avg_steps = summary.avg_steps,
                avg_reward = summary.avg_reward,
                wall_hits,
                obstacle_hits,
                "Run metrics"
            );
        }
        Ok(())
    }
}

/// JSONL observer - Exports observations to JSON Lines format
pub struct JsonlObserver {
    writer: BufWriter<File>,
    kind: RunKind,
    current_steps: Vec<StepObservation>,
}

impl JsonlObserver {
    /// Create a new JSONL observer
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        Ok(Self {
            writer,
            kind: RunKind::Training,
            current_steps: Vec::new(),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_run_start(&mut self, kind: RunKind, _total_episodes: usize) -> Result<()> {
        self.kind = kind;
        Ok(())
    }

    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        self.current_steps.clear();
        Ok(())
    }

    fn on_step(
        &mut self,
        _episode: usize,
        step: usize,
        state: Position,
        action: Action,
        transition: &Transition,
    ) -> Result<()> {
        self.current_steps.push(StepObservation {
            step,
            state,
            action,
            reward: transition.reward,
            next_state: transition.next_state,
            event: transition.event,
        });
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, record: &EpisodeRecord) -> Result<()> {
        let observation = Observation {
            kind: self.kind,
            episode,
            success: record.success,
            total_reward: record.total_reward,
            steps: std::mem::take(&mut self.current_steps),
        };

        // One JSON object per line
        serde_json::to_writer(&mut self.writer, &observation)?;
        writeln!(&mut self.writer)?;
        Ok(())
    }

    fn on_run_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes the run's learning curve as CSV when the run ends.
pub struct LearningCurveObserver {
    path: PathBuf,
    title: String,
    records: Vec<EpisodeRecord>,
}

impl LearningCurveObserver {
    pub fn new(path: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            records: Vec::new(),
        }
    }
}

impl Observer for LearningCurveObserver {
    fn on_run_start(&mut self, _kind: RunKind, total_episodes: usize) -> Result<()> {
        self.records = Vec::with_capacity(total_episodes);
        Ok(())
    }

    fn on_episode_end(&mut self, _episode: usize, record: &EpisodeRecord) -> Result<()> {
        self.records.push(*record);
        Ok(())
    }

    fn on_run_end(&mut self) -> Result<()> {
        LearningCurve::from_records(self.title.clone(), &self.records).save_csv(&self.path)
    }
}
