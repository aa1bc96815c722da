//! Output formatting and progress indicators for CLI

use indicatif::{ProgressBar, ProgressStyle};

use crate::{Error, Result, analysis::Summary, pipeline::ComparisonReport};

/// Create a spinner for long-running tasks
pub fn create_spinner(message: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .map_err(|e| Error::ProgressBarTemplate {
                message: e.to_string(),
            })?,
    );
    pb.set_message(message.to_string());
    Ok(pb)
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

pub fn format_percent(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

/// Print the three episode averages
pub fn print_summary(summary: &Summary) {
    print_kv("Episodes", &summary.episodes.to_string());
    print_kv("Success rate", &format_percent(summary.success_rate));
    print_kv("Avg steps", &format!("{:.2}", summary.avg_steps));
    print_kv("Avg reward", &format!("{:.2}", summary.avg_reward));
}

/// Print one line per condition and policy
pub fn print_comparison_table(report: &ComparisonReport) {
    println!(
        "  {:<8} {:>4} {:<8} {:<20} {:>8} {:>9} {:>10}",
        "grid", "obs", "mode", "policy", "success", "avg steps", "avg reward"
    );
    for row in &report.results {
        println!(
            "  {:<8} {:>4} {:<8} {:<20} {:>8} {:>9.2} {:>10.2}",
            format!("{}x{}", row.rows, row.cols),
            row.obstacles,
            row.mode.to_string(),
            row.policy,
            format_percent(row.success_rate),
            row.avg_steps,
            row.avg_reward
        );
    }
}
