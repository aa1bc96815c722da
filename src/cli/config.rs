//! Shared configuration types for CLI commands

use std::path::Path;

use clap::Args;
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    gridworld::{GridConfig, ObstacleMode},
    pipeline::TrainingConfig,
    q_learning::AgentConfig,
};

/// Grid, agent and training parameters for one experiment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfig {
    #[serde(default)]
    pub grid: GridConfig,

    #[serde(default)]
    pub agent: AgentConfig,

    #[serde(default)]
    pub training: TrainingConfig,

    /// Greedy evaluation episodes after training
    #[serde(default = "default_evaluation_episodes")]
    pub evaluation_episodes: usize,
}

fn default_evaluation_episodes() -> usize {
    100
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            agent: AgentConfig::default(),
            training: TrainingConfig::default(),
            evaluation_episodes: default_evaluation_episodes(),
        }
    }
}

impl ExperimentConfig {
    /// Load from a JSON file and validate.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let config: Self = serde_json::from_reader(file)?;
        config.grid.validate()?;
        config.agent.validate()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Apply one seed to the grid layout, the training run and the agent.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.grid.seed = Some(seed);
        self.training.seed = Some(seed);
        self
    }
}

/// Grid geometry flags
#[derive(Args, Debug, Clone)]
pub struct GridArgs {
    /// Number of rows
    #[arg(long, default_value_t = 5)]
    pub rows: usize,

    /// Number of columns
    #[arg(long, default_value_t = 5)]
    pub cols: usize,

    /// Number of randomly placed obstacles
    #[arg(long, default_value_t = 4)]
    pub obstacles: usize,

    /// Regenerate obstacles on every reset
    #[arg(long)]
    pub dynamic: bool,
}

impl GridArgs {
    /// Start at the top-left corner, goal at the bottom-right.
    pub fn to_config(&self) -> GridConfig {
        let mode = if self.dynamic {
            ObstacleMode::Dynamic
        } else {
            ObstacleMode::Static
        };
        GridConfig::new(self.rows, self.cols)
            .with_obstacle_count(self.obstacles)
            .with_mode(mode)
    }
}

/// Q-learning hyperparameter flags
#[derive(Args, Debug, Clone)]
pub struct AgentArgs {
    /// Learning rate α
    #[arg(long, default_value_t = 0.1)]
    pub alpha: f64,

    /// Discount factor γ
    #[arg(long, default_value_t = 0.9)]
    pub gamma: f64,

    /// Initial exploration rate ε
    #[arg(long, default_value_t = 1.0)]
    pub epsilon: f64,

    /// Multiplicative ε decay per episode
    #[arg(long, default_value_t = 0.995)]
    pub epsilon_decay: f64,

    /// Lower bound for ε
    #[arg(long, default_value_t = 0.01)]
    pub min_epsilon: f64,
}

impl AgentArgs {
    pub fn to_config(&self) -> AgentConfig {
        AgentConfig::default()
            .with_learning_rate(self.alpha)
            .with_discount_factor(self.gamma)
            .with_epsilon(self.epsilon)
            .with_epsilon_decay(self.epsilon_decay, self.min_epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("experiment.json");
        std::fs::write(
            &path,
            r#"{
                "grid": {"rows": 7, "cols": 7, "start": {"row": 0, "col": 0},
                         "goal": {"row": 6, "col": 6}, "obstacles": {"count": 8},
                         "mode": "dynamic"},
                "training": {"episodes": 300}
            }"#,
        )
        .unwrap();

        let config = ExperimentConfig::load(&path).unwrap();
        assert_eq!(config.grid.mode, ObstacleMode::Dynamic);
        assert_eq!(config.training.max_steps, 100);
        assert_eq!(config.agent, AgentConfig::default());
        assert_eq!(config.evaluation_episodes, 100);
    }

    #[test]
    fn invalid_grid_in_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        let mut config = ExperimentConfig::default();
        config.grid.goal = config.grid.start;
        config.save(&path).unwrap();

        assert!(matches!(
            ExperimentConfig::load(&path),
            Err(crate::Error::InvalidConfiguration { .. })
        ));
    }
}
