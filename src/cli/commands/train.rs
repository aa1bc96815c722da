//! Train command - Train a Q-learning agent, then evaluate it greedily

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    analysis::Summary,
    cli::{
        config::{AgentArgs, ExperimentConfig, GridArgs},
        output::{format_percent, print_kv, print_section, print_subsection, print_summary},
        render::render_env,
    },
    gridworld::{GridConfig, GridWorld},
    pipeline::{
        ExploitPolicy, JsonlObserver, MetricsObserver, ProgressObserver, TrainingConfig,
        TrainingPipeline, TrainingResult,
    },
    ports::Policy,
    q_learning::{AgentConfig, QLearningAgent},
};

#[derive(Debug, Serialize)]
struct TrainingStats {
    episodes: usize,
    success_rate: f64,
    final_epsilon: f64,
    table_size: usize,
}

#[derive(Debug, Serialize)]
struct TrainingSummaryFile<'a> {
    grid: &'a GridConfig,
    agent: &'a AgentConfig,
    training: TrainingStats,
    evaluation: Summary,
}

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Trailing separator or missing filename means a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Train a Q-learning agent and evaluate it greedily")]
pub struct TrainArgs {
    #[command(flatten)]
    pub grid: GridArgs,

    #[command(flatten)]
    pub agent: AgentArgs,

    /// Number of training episodes
    #[arg(long, short = 'e', default_value_t = 500)]
    pub episodes: usize,

    /// Step budget per episode
    #[arg(long, default_value_t = 100)]
    pub max_steps: usize,

    /// Number of greedy evaluation episodes after training
    #[arg(long, default_value_t = 100)]
    pub eval_episodes: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON experiment file; replaces the grid, agent and training flags
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Optional path for the training learning curve (CSV)
    #[arg(long)]
    pub curve: Option<PathBuf>,

    /// Optional file for JSONL observations of the training episodes
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Show one greedy rollout of the trained agent
    #[arg(long)]
    pub render: bool,

    /// Show progress bars
    #[arg(long)]
    pub progress: bool,
}

impl TrainArgs {
    fn experiment(&self) -> Result<ExperimentConfig> {
        let config = match &self.config {
            Some(path) => ExperimentConfig::load(path)
                .with_context(|| format!("Failed to load experiment from {}", path.display()))?,
            None => ExperimentConfig {
                grid: self.grid.to_config(),
                agent: self.agent.to_config(),
                training: TrainingConfig::new(self.episodes, self.max_steps),
                evaluation_episodes: self.eval_episodes,
            },
        };
        Ok(match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        })
    }
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let experiment = args.experiment()?;

    let mut env = GridWorld::new(experiment.grid.clone()).context("Invalid grid configuration")?;
    let mut agent =
        QLearningAgent::new(experiment.agent.clone()).context("Invalid agent configuration")?;

    print_section("Q-Learning Training");
    print_kv(
        "Grid",
        &format!(
            "{}x{} ({} obstacles, {})",
            env.rows(),
            env.cols(),
            env.obstacles().len(),
            env.mode()
        ),
    );
    print_kv("Episodes", &experiment.training.episodes.to_string());
    print_kv("Max steps", &experiment.training.max_steps.to_string());

    let mut pipeline = TrainingPipeline::new(experiment.training.clone());
    if args.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    pipeline = pipeline.with_observer(Box::new(MetricsObserver::new()));
    if let Some(path) = &args.observations {
        let observer = JsonlObserver::new(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        pipeline = pipeline.with_observer(Box::new(observer));
    }

    let result = pipeline.train(&mut env, &mut agent)?;
    print_training(&result, &agent);
    if let Some(path) = &args.curve {
        result
            .learning_curve(agent.name())
            .save_csv(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    let mut evaluator = TrainingPipeline::new(TrainingConfig {
        episodes: experiment.evaluation_episodes,
        ..experiment.training.clone()
    });
    if args.progress {
        evaluator = evaluator.with_observer(Box::new(ProgressObserver::new()));
    }
    let evaluation = evaluator.evaluate(&mut env, &agent)?;

    print_subsection("Greedy Evaluation");
    print_summary(&evaluation);

    if args.render {
        print_subsection("Greedy Rollout");
        render_rollout(&mut env, &agent, experiment.training.max_steps)?;
    }

    if let Some(raw) = &args.summary {
        let path = sanitize_summary_path(raw);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let summary = TrainingSummaryFile {
            grid: &experiment.grid,
            agent: &experiment.agent,
            training: TrainingStats {
                episodes: result.records.len(),
                success_rate: result.success_rate,
                final_epsilon: result.final_epsilon,
                table_size: agent.table_size(),
            },
            evaluation,
        };
        let file = std::fs::File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(file, &summary)?;
        println!("\nSummary written to {}", path.display());
    }

    Ok(())
}

fn print_training(result: &TrainingResult, agent: &QLearningAgent) {
    print_subsection("Training");
    print_kv("Episodes", &result.records.len().to_string());
    print_kv("Success rate", &format_percent(result.success_rate));
    print_kv("Final epsilon", &format!("{:.4}", result.final_epsilon));
    print_kv("Q-table entries", &agent.table_size().to_string());
}

fn render_rollout(env: &mut GridWorld, agent: &QLearningAgent, max_steps: usize) -> Result<()> {
    let mut policy = ExploitPolicy::new(agent);
    let mut state = env.reset();
    println!("{}", render_env(env));

    for step in 1..=max_steps {
        let action = policy.select_action(state, env)?;
        let transition = env.step(action);
        println!("step {step}: {action} -> {}", transition.event);
        println!("{}", render_env(env));
        state = transition.next_state;
        if transition.done {
            println!("Goal reached in {step} steps");
            return Ok(());
        }
    }
    println!("Goal not reached within {max_steps} steps");
    Ok(())
}
