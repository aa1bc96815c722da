//! Training and evaluation loop
//!
//! One loop shape drives everything: reset, pick an action, step, and
//! repeat until the goal is reached or the step budget runs out. Training
//! feeds each transition to the agent before advancing; evaluation and
//! rollouts never touch a Q-table.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    Result,
    analysis::{EpisodeRecord, Summary, summarize},
    export::LearningCurve,
    gridworld::{Action, GridWorld, Position, Transition},
    ports::{Observer, Policy, RunKind},
    q_learning::QLearningAgent,
};

use super::policies::ExploitPolicy;

/// Training configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of episodes per run
    pub episodes: usize,

    /// Step budget per episode
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,

    /// Random seed
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_max_steps() -> usize {
    100
}

impl TrainingConfig {
    pub fn new(episodes: usize, max_steps: usize) -> Self {
        Self {
            episodes,
            max_steps,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 500,
            max_steps: default_max_steps(),
            seed: None,
        }
    }
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// One record per episode, in order
    pub records: Vec<EpisodeRecord>,

    /// Total reward per episode
    pub rewards: Vec<f64>,

    /// Steps per episode
    pub steps: Vec<usize>,

    /// Fraction of episodes that reached the goal
    pub success_rate: f64,

    /// Exploration rate after the last episode's decay
    pub final_epsilon: f64,
}

impl TrainingResult {
    /// Create a training result from episode records
    pub fn new(records: Vec<EpisodeRecord>, final_epsilon: f64) -> Self {
        let rewards = records.iter().map(|r| r.total_reward).collect();
        let steps = records.iter().map(|r| r.steps).collect();
        let success_rate = if records.is_empty() {
            0.0
        } else {
            records.iter().filter(|r| r.success).count() as f64 / records.len() as f64
        };

        Self {
            records,
            rewards,
            steps,
            success_rate,
            final_epsilon,
        }
    }

    /// Reward and step series for the plotting collaborator
    pub fn learning_curve(&self, title: impl Into<String>) -> LearningCurve {
        LearningCurve::from_records(title, &self.records)
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Episode loop with pluggable observers
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Play a single episode with `policy` and no learning.
    pub fn run_episode(
        &mut self,
        env: &mut GridWorld,
        policy: &mut dyn Policy,
    ) -> Result<EpisodeRecord> {
        self.play_episode(0, env, |state, env| {
            let action = policy.select_action(state, env)?;
            Ok((action, env.step(action)))
        })
    }

    /// Play `config.episodes` episodes with a fixed policy.
    pub fn run_many(
        &mut self,
        env: &mut GridWorld,
        policy: &mut dyn Policy,
    ) -> Result<Vec<EpisodeRecord>> {
        if let Some(seed) = self.config.seed {
            env.reseed(seed);
        }

        self.notify_run_start(RunKind::Rollout)?;
        let mut records = Vec::with_capacity(self.config.episodes);
        for episode in 0..self.config.episodes {
            let record = self.play_episode(episode, env, |state, env| {
                let action = policy.select_action(state, env)?;
                Ok((action, env.step(action)))
            })?;
            records.push(record);
        }
        self.notify_run_end()?;

        if let Ok(summary) = summarize(&records) {
            info!(
                policy = policy.name(),
                episodes = summary.episodes,
                success_rate = summary.success_rate,
                avg_steps = summary.avg_steps,
                avg_reward = summary.avg_reward,
                "Rollout finished"
            );
        }
        Ok(records)
    }

    /// Train `agent` for `config.episodes` episodes.
    ///
    /// Every transition is fed to [`QLearningAgent::update`] before the
    /// state advances. ε is read fresh on every step and decays once after
    /// each episode.
    pub fn train(
        &mut self,
        env: &mut GridWorld,
        agent: &mut QLearningAgent,
    ) -> Result<TrainingResult> {
        if let Some(seed) = self.config.seed {
            env.reseed(seed);
            agent.reseed(seed.wrapping_add(1));
        }

        self.notify_run_start(RunKind::Training)?;
        let mut records = Vec::with_capacity(self.config.episodes);
        for episode in 0..self.config.episodes {
            let record = self.play_episode(episode, env, |state, env| {
                let action = agent.choose_action(state);
                let transition = env.step(action);
                agent.update(state, action, transition.reward, transition.next_state);
                Ok((action, transition))
            })?;
            agent.decay_epsilon();
            records.push(record);
        }
        self.notify_run_end()?;

        let result = TrainingResult::new(records, agent.epsilon());
        info!(
            episodes = result.records.len(),
            success_rate = result.success_rate,
            epsilon = result.final_epsilon,
            table_size = agent.table_size(),
            "Training finished"
        );
        Ok(result)
    }

    /// Evaluate `agent` greedily for `config.episodes` episodes.
    ///
    /// The agent is borrowed immutably: evaluation cannot alter its
    /// Q-table, and ε is bypassed.
    pub fn evaluate(&mut self, env: &mut GridWorld, agent: &QLearningAgent) -> Result<Summary> {
        if let Some(seed) = self.config.seed {
            env.reseed(seed);
        }

        let mut policy = ExploitPolicy::new(agent);
        self.notify_run_start(RunKind::Evaluation)?;
        let mut records = Vec::with_capacity(self.config.episodes);
        for episode in 0..self.config.episodes {
            let record = self.play_episode(episode, env, |state, env| {
                let action = policy.select_action(state, env)?;
                Ok((action, env.step(action)))
            })?;
            records.push(record);
        }
        self.notify_run_end()?;

        let summary = summarize(&records)?;
        if summary.success_rate == 0.0 {
            warn!(
                episodes = summary.episodes,
                max_steps = self.config.max_steps,
                "No evaluation episode reached the goal"
            );
        }
        info!(
            episodes = summary.episodes,
            success_rate = summary.success_rate,
            avg_steps = summary.avg_steps,
            avg_reward = summary.avg_reward,
            "Evaluation finished"
        );
        Ok(summary)
    }

    fn play_episode<F>(
        &mut self,
        episode: usize,
        env: &mut GridWorld,
        mut act: F,
    ) -> Result<EpisodeRecord>
    where
        F: FnMut(Position, &mut GridWorld) -> Result<(Action, Transition)>,
    {
        let mut state = env.reset();
        for observer in &mut self.observers {
            observer.on_episode_start(episode)?;
        }

        let mut steps = 0;
        let mut total_reward = 0.0;
        let mut success = false;

        while steps < self.config.max_steps {
            let (action, transition) = act(state, env)?;
            total_reward += transition.reward;

            for observer in &mut self.observers {
                observer.on_step(episode, steps, state, action, &transition)?;
            }

            steps += 1;
            state = transition.next_state;
            if transition.done {
                success = true;
                break;
            }
        }

        let record = EpisodeRecord {
            steps,
            total_reward,
            success,
        };
        debug!(episode, steps, total_reward, success, "Episode finished");

        for observer in &mut self.observers {
            observer.on_episode_end(episode, &record)?;
        }
        Ok(record)
    }

    fn notify_run_start(&mut self, kind: RunKind) -> Result<()> {
        for observer in &mut self.observers {
            observer.on_run_start(kind, self.config.episodes)?;
        }
        Ok(())
    }

    fn notify_run_end(&mut self) -> Result<()> {
        for observer in &mut self.observers {
            observer.on_run_end()?;
        }
        Ok(())
    }
}

/// Play one episode of `policy`, stopping at the goal or after
/// `max_steps` steps.
pub fn run_episode(
    env: &mut GridWorld,
    policy: &mut dyn Policy,
    max_steps: usize,
) -> Result<EpisodeRecord> {
    TrainingPipeline::new(TrainingConfig::new(1, max_steps)).run_episode(env, policy)
}

/// Train `agent` for `episodes` episodes. The agent keeps its refined
/// Q-table afterwards.
pub fn train(
    env: &mut GridWorld,
    agent: &mut QLearningAgent,
    episodes: usize,
    max_steps: usize,
) -> Result<TrainingResult> {
    TrainingPipeline::new(TrainingConfig::new(episodes, max_steps)).train(env, agent)
}

/// Greedy evaluation of `agent` over `episodes` episodes.
///
/// # Errors
///
/// [`Error::EmptyInput`](crate::Error::EmptyInput) when `episodes` is zero.
pub fn evaluate(
    env: &mut GridWorld,
    agent: &QLearningAgent,
    episodes: usize,
    max_steps: usize,
) -> Result<Summary> {
    TrainingPipeline::new(TrainingConfig::new(episodes, max_steps)).evaluate(env, agent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        gridworld::GridConfig,
        pipeline::policies::{GreedyPolicy, ScriptedPolicy},
        q_learning::AgentConfig,
    };

    #[test]
    fn test_scripted_episode_reaches_goal() {
        let mut env = GridWorld::new(GridConfig::new(5, 5)).unwrap();
        let mut policy = ScriptedPolicy::from_ids(&[3, 3, 3, 3, 1, 1, 1, 1]).unwrap();

        let record = run_episode(&mut env, &mut policy, 100).unwrap();

        assert_eq!(record.steps, 8);
        assert_eq!(record.total_reward, 93.0);
        assert!(record.success);
    }

    #[test]
    fn test_truncation_is_not_failure() {
        let mut env = GridWorld::new(GridConfig::new(5, 5)).unwrap();
        let mut policy = ScriptedPolicy::from_ids(&[0, 0, 0]).unwrap();

        let record = run_episode(&mut env, &mut policy, 3).unwrap();

        assert_eq!(record.steps, 3);
        assert_eq!(record.total_reward, -15.0);
        assert!(!record.success);
    }

    #[test]
    fn test_zero_step_budget() {
        let mut env = GridWorld::new(GridConfig::new(5, 5)).unwrap();
        let mut policy = GreedyPolicy::default();
        let record = run_episode(&mut env, &mut policy, 0).unwrap();
        assert_eq!(record.steps, 0);
        assert_eq!(record.total_reward, 0.0);
        assert!(!record.success);
    }

    #[test]
    fn test_train_reports_per_episode_series() {
        let mut env = GridWorld::new(GridConfig::new(4, 4).with_seed(1)).unwrap();
        let mut agent = QLearningAgent::new(AgentConfig::default().with_seed(2)).unwrap();

        let result = train(&mut env, &mut agent, 25, 50).unwrap();

        assert_eq!(result.records.len(), 25);
        assert_eq!(result.rewards.len(), 25);
        assert_eq!(result.steps.len(), 25);
        assert!(result.steps.iter().all(|&s| s <= 50));
        assert!((0.0..=1.0).contains(&result.success_rate));
        assert!(agent.table_size() > 0);
    }

    #[test]
    fn test_train_decays_epsilon_per_episode() {
        let mut env = GridWorld::new(GridConfig::new(3, 3).with_seed(1)).unwrap();
        let mut agent = QLearningAgent::new(
            AgentConfig::default()
                .with_epsilon(1.0)
                .with_epsilon_decay(0.5, 0.2)
                .with_seed(2),
        )
        .unwrap();

        let result = train(&mut env, &mut agent, 2, 10).unwrap();
        assert_eq!(result.final_epsilon, 0.25);

        train(&mut env, &mut agent, 3, 10).unwrap();
        assert_eq!(agent.epsilon(), 0.2);
    }

    #[test]
    fn test_train_zero_episodes() {
        let mut env = GridWorld::new(GridConfig::new(3, 3)).unwrap();
        let mut agent = QLearningAgent::new(AgentConfig::default().with_seed(2)).unwrap();
        let result = train(&mut env, &mut agent, 0, 10).unwrap();
        assert!(result.records.is_empty());
        assert_eq!(result.success_rate, 0.0);
    }

    #[test]
    fn test_evaluate_zero_episodes_is_empty_input() {
        let mut env = GridWorld::new(GridConfig::new(3, 3)).unwrap();
        let agent = QLearningAgent::new(AgentConfig::default().with_seed(2)).unwrap();
        assert!(matches!(
            evaluate(&mut env, &agent, 0, 10),
            Err(crate::Error::EmptyInput { .. })
        ));
    }

    #[test]
    fn test_script_exhaustion_propagates() {
        let mut env = GridWorld::new(GridConfig::new(5, 5)).unwrap();
        let mut policy = ScriptedPolicy::from_ids(&[3]).unwrap();
        assert!(matches!(
            run_episode(&mut env, &mut policy, 10),
            Err(crate::Error::ScriptExhausted { steps: 1 })
        ));
    }
}
