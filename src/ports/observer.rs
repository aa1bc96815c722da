//! Observer port - abstraction for episode observation and data collection
//!
//! This port defines the interface for observing training and evaluation
//! runs, allowing composable data collection without coupling the loop to
//! specific output formats or metrics.

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    analysis::EpisodeRecord,
    gridworld::{Action, Position, Transition},
};

/// Which kind of run the observed episodes belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunKind {
    /// Episodes whose transitions update the agent's Q-table
    Training,
    /// Pure exploitation, no updates
    Evaluation,
    /// Fixed, non-learning policies
    Rollout,
}

/// Observer trait for monitoring runs
///
/// Observers can be composed to collect different types of data:
/// - Progress bars for user feedback
/// - JSONL export for analysis
/// - Metrics and learning curves for reporting
///
/// # Event Sequence
///
/// 1. `on_run_start(kind, total_episodes)` - Once at the beginning
/// 2. For each episode:
///    - `on_episode_start(episode)`
///    - `on_step(...)` - For each transition
///    - `on_episode_end(episode, record)`
/// 3. `on_run_end()` - Once at the end
///
/// # Examples
///
/// ```
/// use gridq::{analysis::EpisodeRecord, ports::Observer};
///
/// struct SuccessCounter {
///     successes: usize,
/// }
///
/// impl Observer for SuccessCounter {
///     fn on_episode_end(&mut self, _episode: usize, record: &EpisodeRecord) -> gridq::Result<()> {
///         if record.success {
///             self.successes += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called when a run starts.
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to initialize observation state.
    fn on_run_start(&mut self, _kind: RunKind, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called after the environment is reset for a new episode.
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        Ok(())
    }

    /// Called for each transition, after the agent (if training) has
    /// applied its update.
    ///
    /// # Parameters
    ///
    /// * `episode` - Index of the current episode
    /// * `step` - Step number within the episode (0-based)
    /// * `state` - Agent position before the action
    /// * `action` - Action applied
    /// * `transition` - Outcome returned by the environment
    fn on_step(
        &mut self,
        _episode: usize,
        _step: usize,
        _state: Position,
        _action: Action,
        _transition: &Transition,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when an episode reaches the goal or exhausts its step budget.
    fn on_episode_end(&mut self, _episode: usize, _record: &EpisodeRecord) -> Result<()> {
        Ok(())
    }

    /// Called when the run completes.
    ///
    /// Use this to finalize outputs, flush files, or close progress bars.
    fn on_run_end(&mut self) -> Result<()> {
        Ok(())
    }
}
