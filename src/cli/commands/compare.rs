//! Compare command - Compare baselines and Q-learning across grid conditions

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::{
        config::AgentArgs,
        output::{create_spinner, print_comparison_table, print_section},
    },
    pipeline::{ComparisonConfig, ComparisonFramework},
};

#[derive(Parser, Debug)]
#[command(about = "Compare greedy, random and Q-learning policies")]
pub struct CompareArgs {
    /// Evaluation episodes per policy and condition
    #[arg(long, short = 'e', default_value_t = 30)]
    pub episodes: usize,

    /// Q-learning training episodes per condition
    #[arg(long, default_value_t = 500)]
    pub training_episodes: usize,

    /// Step budget per episode
    #[arg(long, default_value_t = 100)]
    pub max_steps: usize,

    #[command(flatten)]
    pub agent: AgentArgs,

    /// Export comparison results to CSV
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn execute(args: CompareArgs) -> Result<()> {
    let config = ComparisonConfig {
        episodes: args.episodes,
        training_episodes: args.training_episodes,
        max_steps: args.max_steps,
        agent: args.agent.to_config(),
        seed: args.seed,
    };
    config.agent.validate().context("Invalid agent configuration")?;

    let framework = ComparisonFramework::new(config);
    print_section("Policy Comparison");
    println!(
        "{} conditions, {} evaluation episodes each",
        framework.conditions().len(),
        args.episodes
    );

    let spinner = create_spinner("Running conditions...")?;
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    let report = framework.run();
    spinner.finish_and_clear();
    let report = report?;

    println!();
    print_comparison_table(&report);

    if let Some(path) = &args.output {
        report
            .save_csv(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("\nResults exported to {}", path.display());
    }

    Ok(())
}
