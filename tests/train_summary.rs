use clap::Parser;
use gridq::cli::commands::{
    baseline::{self, BaselineArgs},
    train::{TrainArgs, execute},
};
use tempfile::tempdir;

fn parse_args<I, T>(args: I) -> TrainArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    TrainArgs::parse_from(args)
}

#[test]
fn summary_without_extension_appends_json() {
    let tmp = tempdir().unwrap();
    let summary_stem = tmp.path().join("run_overview");

    let args = parse_args([
        "gridq-train",
        "--episodes",
        "20",
        "--eval-episodes",
        "5",
        "--seed",
        "3",
        "--summary",
        summary_stem.to_str().unwrap(),
    ]);

    execute(args).expect("training with summary should succeed");

    let expected_path = summary_stem.with_extension("json");
    assert!(
        expected_path.exists(),
        "expected summary at {}",
        expected_path.display()
    );

    let contents = std::fs::read_to_string(&expected_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["training"]["episodes"], 20);
    assert_eq!(parsed["evaluation"]["episodes"], 5);
    assert_eq!(parsed["grid"]["rows"], 5);
    assert_eq!(parsed["grid"]["seed"], 3);
}

#[test]
fn summary_directory_argument_creates_default_file() {
    let tmp = tempdir().unwrap();
    let summary_dir = tmp.path().join("summaries");
    let summary_arg = format!("{}/", summary_dir.display());

    let args = parse_args([
        "gridq-train",
        "--episodes",
        "3",
        "--eval-episodes",
        "1",
        "--summary",
        &summary_arg,
    ]);

    execute(args).expect("training with directory summary should succeed");

    let expected_path = summary_dir.join("training_summary.json");
    assert!(
        expected_path.exists(),
        "expected summary at {}",
        expected_path.display()
    );

    let contents = std::fs::read_to_string(&expected_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["training"]["episodes"], 3);
}

#[test]
fn curve_and_observations_are_written_per_training_episode() {
    let tmp = tempdir().unwrap();
    let curve = tmp.path().join("curve.csv");
    let observations = tmp.path().join("observations.jsonl");

    let args = parse_args([
        "gridq-train",
        "--rows",
        "4",
        "--cols",
        "4",
        "--obstacles",
        "2",
        "--episodes",
        "12",
        "--eval-episodes",
        "2",
        "--max-steps",
        "30",
        "--seed",
        "8",
        "--curve",
        curve.to_str().unwrap(),
        "--observations",
        observations.to_str().unwrap(),
    ]);

    execute(args).expect("training with curve and observations should succeed");

    let csv_text = std::fs::read_to_string(&curve).unwrap();
    let mut lines = csv_text.lines();
    assert_eq!(lines.next(), Some("episode,total_reward,steps"));
    assert_eq!(lines.count(), 12);

    let jsonl = std::fs::read_to_string(&observations).unwrap();
    let episodes: Vec<serde_json::Value> = jsonl
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(episodes.len(), 12);
    assert_eq!(episodes[0]["kind"], "training");
    assert!(episodes.iter().all(|e| e["steps"].as_array().unwrap().len() <= 30));
}

#[test]
fn config_file_replaces_flags() {
    let tmp = tempdir().unwrap();
    let config_path = tmp.path().join("experiment.json");
    std::fs::write(
        &config_path,
        r#"{
            "grid": {"rows": 3, "cols": 4, "start": {"row": 0, "col": 0},
                     "goal": {"row": 2, "col": 3}},
            "agent": {"learning_rate": 0.5, "discount_factor": 0.9, "epsilon": 0.5},
            "training": {"episodes": 7, "max_steps": 20},
            "evaluation_episodes": 2
        }"#,
    )
    .unwrap();
    let summary = tmp.path().join("summary.json");

    let args = parse_args([
        "gridq-train",
        "--config",
        config_path.to_str().unwrap(),
        "--summary",
        summary.to_str().unwrap(),
    ]);
    execute(args).expect("training from config file should succeed");

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&summary).unwrap()).unwrap();
    assert_eq!(parsed["grid"]["cols"], 4);
    assert_eq!(parsed["training"]["episodes"], 7);
    assert_eq!(parsed["evaluation"]["episodes"], 2);
}

#[test]
fn missing_config_file_is_reported() {
    let tmp = tempdir().unwrap();
    let args = parse_args([
        "gridq-train",
        "--config",
        tmp.path().join("missing.json").to_str().unwrap(),
    ]);
    let err = execute(args).unwrap_err();
    assert!(err.to_string().contains("Failed to load experiment"));
}

#[test]
fn baseline_command_runs_both_policies() {
    for policy in ["greedy", "random"] {
        let args = BaselineArgs::parse_from([
            "gridq-baseline",
            policy,
            "--episodes",
            "4",
            "--seed",
            "1",
            "--dynamic",
        ]);
        baseline::execute(args).expect("baseline run should succeed");
    }
}

#[test]
fn baseline_curve_has_one_row_per_episode() {
    let tmp = tempdir().unwrap();
    let curve = tmp.path().join("greedy.csv");
    let args = BaselineArgs::parse_from([
        "gridq-baseline",
        "greedy",
        "--episodes",
        "5",
        "--seed",
        "3",
        "--curve",
        curve.to_str().unwrap(),
    ]);
    baseline::execute(args).expect("baseline run with curve should succeed");

    let csv_text = std::fs::read_to_string(&curve).unwrap();
    let mut lines = csv_text.lines();
    assert_eq!(lines.next(), Some("episode,total_reward,steps"));
    let rows: Vec<_> = lines.collect();
    assert_eq!(rows.len(), 5);
    assert!(rows[0].starts_with("1,"));
}
