//! Tests for report output through the analyze command.

use std::path::PathBuf;

use clap::Parser;
use tempfile::TempDir;
use textgauge::cli::{self, Cli, Commands, EXIT_ERROR, EXIT_FAILED, EXIT_SUCCESS};
use textgauge::metrics::MetricRecord;

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

/// Run `textgauge analyze` with the testdata config plus `extra` arguments.
fn run_analyze(extra: &[&str]) -> i32 {
    let testdata = testdata_path();
    let config = testdata.join("textgauge.yaml");
    let articles = testdata.join("articles");

    let mut argv = vec![
        "textgauge".to_string(),
        "analyze".to_string(),
        articles.to_string_lossy().into_owned(),
        "--config".to_string(),
        config.to_string_lossy().into_owned(),
    ];
    argv.extend(extra.iter().map(|s| s.to_string()));

    match Cli::parse_from(argv).command {
        Commands::Analyze(args) => cli::run_analyze(&args).expect("analyze should run"),
        Commands::Init(_) => unreachable!(),
    }
}

#[test]
fn test_json_report_to_file() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("report.json");

    let code = run_analyze(&["--format", "json", "--output", output.to_str().unwrap()]);
    assert_eq!(code, EXIT_SUCCESS);

    let content = std::fs::read_to_string(&output).unwrap();
    let report: serde_json::Value = serde_json::from_str(&content).unwrap();

    assert_eq!(report["version"], env!("CARGO_PKG_VERSION"));
    let docs = report["documents"].as_array().unwrap();
    assert_eq!(docs.len(), 4);
    assert_eq!(docs[0]["id"], "article_alpha");
    assert_eq!(docs[0]["status"], "analyzed");

    let metrics = docs[0]["metrics"].as_object().unwrap();
    let keys: Vec<&str> = metrics.keys().map(String::as_str).collect();
    let mut expected = MetricRecord::FIELD_NAMES.to_vec();
    expected.sort_unstable();
    let mut sorted_keys = keys.clone();
    sorted_keys.sort_unstable();
    assert_eq!(sorted_keys, expected);
    assert_eq!(metrics["FOG INDEX"], 12.667);

    assert_eq!(docs[2]["status"], "insufficient_content");
    assert!(docs[2].get("metrics").is_none());

    assert_eq!(report["summary"]["total"], 4);
    assert_eq!(report["summary"]["analyzed"], 3);
    assert_eq!(report["summary"]["insufficient_content"], 1);
}

#[test]
fn test_pretty_report_to_file() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("report.txt");

    let code = run_analyze(&["--output", output.to_str().unwrap()]);
    assert_eq!(code, EXIT_SUCCESS);

    let content = std::fs::read_to_string(&output).unwrap();
    assert!(content.contains("article_alpha"));
    assert!(content.contains("PERCENTAGE OF COMPLEX WORDS"));
    assert!(content.contains("26.667"));
    assert!(content.contains("EMPTY"));
    assert!(content.contains("4 documents: 3 analyzed, 1 insufficient"));
    // Colors are disabled for file output
    assert!(!content.contains('\u{1b}'));
}

#[test]
fn test_strict_fails_on_insufficient_content() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("report.json");

    let code = run_analyze(&["--format", "json", "--strict", "--output", output.to_str().unwrap()]);
    assert_eq!(code, EXIT_FAILED);
}

#[test]
fn test_invalid_format_is_usage_error() {
    assert_eq!(run_analyze(&["--format", "csv"]), EXIT_ERROR);
}

#[test]
fn test_missing_config_is_usage_error() {
    let args = Cli::parse_from(["textgauge", "analyze", "--config", "/nonexistent/textgauge.yaml"]);
    match args.command {
        Commands::Analyze(args) => assert_eq!(cli::run_analyze(&args).unwrap(), EXIT_ERROR),
        Commands::Init(_) => unreachable!(),
    }
}
