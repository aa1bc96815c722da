//! Baseline command - Run a non-learning policy for a number of episodes

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use crate::{
    analysis::summarize,
    cli::{
        config::GridArgs,
        output::{print_kv, print_section, print_summary},
        render::render_env,
    },
    gridworld::GridWorld,
    pipeline::{
        GreedyPolicy, LearningCurveObserver, MetricsObserver, ProgressObserver, RandomPolicy,
        TrainingConfig, TrainingPipeline,
    },
    ports::Policy,
};

/// Which baseline to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BaselineKind {
    /// Step toward the goal, escaping randomly when blocked
    Greedy,
    /// Uniformly random actions
    Random,
}

#[derive(Parser, Debug)]
#[command(about = "Run the greedy or random baseline")]
pub struct BaselineArgs {
    /// Baseline policy
    #[arg(value_enum, default_value_t = BaselineKind::Greedy)]
    pub policy: BaselineKind,

    #[command(flatten)]
    pub grid: GridArgs,

    /// Number of episodes
    #[arg(long, short = 'e', default_value_t = 30)]
    pub episodes: usize,

    /// Step budget per episode
    #[arg(long, default_value_t = 100)]
    pub max_steps: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Optional path for the per-episode reward and step series (CSV)
    #[arg(long)]
    pub curve: Option<PathBuf>,

    /// Print the initial layout
    #[arg(long)]
    pub render: bool,

    /// Show a progress bar
    #[arg(long)]
    pub progress: bool,
}

pub fn execute(args: BaselineArgs) -> Result<()> {
    let mut grid = args.grid.to_config();
    grid.seed = args.seed;
    let mut env = GridWorld::new(grid).context("Invalid grid configuration")?;

    let mut policy: Box<dyn Policy> = match args.policy {
        BaselineKind::Greedy => Box::new(GreedyPolicy::default()),
        BaselineKind::Random => Box::new(RandomPolicy::default()),
    };

    print_section(&format!("{} Baseline", policy.name()));
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
    if args.render {
        env.reset();
        println!("\n{}", render_env(&env));
    }

    let mut config = TrainingConfig::new(args.episodes, args.max_steps);
    config.seed = args.seed;
    let mut pipeline =
        TrainingPipeline::new(config).with_observer(Box::new(MetricsObserver::new()));
    if args.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.curve {
        let observer = LearningCurveObserver::new(path, policy.name());
        pipeline = pipeline.with_observer(Box::new(observer));
    }

    let records = pipeline.run_many(&mut env, policy.as_mut())?;
    let summary = summarize(&records).context("No episodes were run")?;
    println!();
    print_summary(&summary);
    Ok(())
}
