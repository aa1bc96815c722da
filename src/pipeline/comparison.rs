//! Comparison framework for evaluating policies across grid conditions
//!
//! Runs the reference experiment grid: three grid sizes with a matching
//! obstacle count, each under static and dynamic obstacles, measuring:
//! - the greedy-toward-goal baseline
//! - the uniformly random baseline
//! - a Q-learning agent, trained on the condition and then evaluated greedily

use std::{io::Write, path::Path};

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{
    policies::{GreedyPolicy, RandomPolicy},
    training::{TrainingConfig, TrainingPipeline},
};
use crate::{
    Result,
    analysis::{Summary, summarize},
    gridworld::{GridConfig, GridWorld, ObstacleMode},
    ports::Policy,
    q_learning::{AgentConfig, QLearningAgent},
};

/// Grid size and obstacle count of one experiment condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub rows: usize,
    pub cols: usize,
    pub obstacles: usize,
    pub mode: ObstacleMode,
}

impl Condition {
    pub fn new(rows: usize, cols: usize, obstacles: usize, mode: ObstacleMode) -> Self {
        Self {
            rows,
            cols,
            obstacles,
            mode,
        }
    }

    /// Start at the top-left corner, goal at the bottom-right.
    pub fn grid_config(&self) -> GridConfig {
        GridConfig::new(self.rows, self.cols)
            .with_obstacle_count(self.obstacles)
            .with_mode(self.mode)
    }
}

/// 5×5 with 4 obstacles, 7×7 with 8 and 10×10 with 15, each static and
/// dynamic.
pub fn reference_conditions() -> Vec<Condition> {
    [(5, 5, 4), (7, 7, 8), (10, 10, 15)]
        .into_iter()
        .flat_map(|(rows, cols, obstacles)| {
            [ObstacleMode::Static, ObstacleMode::Dynamic]
                .map(|mode| Condition::new(rows, cols, obstacles, mode))
        })
        .collect()
}

/// Parameters shared by every condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonConfig {
    /// Evaluation episodes per policy
    pub episodes: usize,
    /// Training episodes for the Q-learning agent
    pub training_episodes: usize,
    pub max_steps: usize,
    pub agent: AgentConfig,
    pub seed: Option<u64>,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            episodes: 30,
            training_episodes: 500,
            max_steps: 100,
            agent: AgentConfig::default(),
            seed: None,
        }
    }
}

/// One row of the comparison table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionResult {
    pub rows: usize,
    pub cols: usize,
    pub obstacles: usize,
    pub mode: ObstacleMode,
    pub policy: String,
    pub episodes: usize,
    pub success_rate: f64,
    pub avg_steps: f64,
    pub avg_reward: f64,
}

impl ConditionResult {
    fn new(condition: &Condition, policy: &str, summary: Summary) -> Self {
        Self {
            rows: condition.rows,
            cols: condition.cols,
            obstacles: condition.obstacles,
            mode: condition.mode,
            policy: policy.to_string(),
            episodes: summary.episodes,
            success_rate: summary.success_rate,
            avg_steps: summary.avg_steps,
            avg_reward: summary.avg_reward,
        }
    }
}

/// Results of a comparison run, in condition order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub results: Vec<ConditionResult>,
}

impl ComparisonReport {
    /// Look up the row for a policy under a condition.
    pub fn get(&self, condition: &Condition, policy: &str) -> Option<&ConditionResult> {
        self.results.iter().find(|r| {
            r.rows == condition.rows
                && r.cols == condition.cols
                && r.obstacles == condition.obstacles
                && r.mode == condition.mode
                && r.policy == policy
        })
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for result in &self.results {
            wtr.serialize(result)?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn save_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_csv(file)
    }
}

/// Runs every policy under every condition
pub struct ComparisonFramework {
    config: ComparisonConfig,
    conditions: Vec<Condition>,
}

impl ComparisonFramework {
    /// Framework over the reference conditions
    pub fn new(config: ComparisonConfig) -> Self {
        Self {
            config,
            conditions: reference_conditions(),
        }
    }

    pub fn with_conditions(mut self, conditions: Vec<Condition>) -> Self {
        self.conditions = conditions;
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Run all conditions.
    ///
    /// Each policy gets a freshly built environment with the condition's
    /// seed, so under static obstacles every policy faces the same layout.
    pub fn run(&self) -> Result<ComparisonReport> {
        let mut report = ComparisonReport::default();

        for (index, condition) in self.conditions.iter().enumerate() {
            let seed = self.config.seed.map(|s| s.wrapping_add(2 * index as u64));
            let build_env = || {
                let mut grid = condition.grid_config();
                grid.seed = seed;
                GridWorld::new(grid)
            };
            let eval_config = TrainingConfig {
                episodes: self.config.episodes,
                max_steps: self.config.max_steps,
                seed,
            };

            let mut greedy = GreedyPolicy::default();
            let mut random = RandomPolicy::default();
            for policy in [&mut greedy as &mut dyn Policy, &mut random] {
                let mut env = build_env()?;
                let records =
                    TrainingPipeline::new(eval_config.clone()).run_many(&mut env, policy)?;
                report
                    .results
                    .push(ConditionResult::new(condition, policy.name(), summarize(&records)?));
            }

            let mut env = build_env()?;
            let mut agent = QLearningAgent::new(self.config.agent.clone())?;
            TrainingPipeline::new(TrainingConfig {
                episodes: self.config.training_episodes,
                ..eval_config.clone()
            })
            .train(&mut env, &mut agent)?;
            let summary = TrainingPipeline::new(eval_config).evaluate(&mut env, &agent)?;
            report
                .results
                .push(ConditionResult::new(condition, agent.name(), summary));

            info!(
                rows = condition.rows,
                cols = condition.cols,
                obstacles = condition.obstacles,
                mode = %condition.mode,
                "Condition finished"
            );
        }

        Ok(report)
    }
}
