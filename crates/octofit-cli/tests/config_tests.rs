//! `config show` output in both formats

use std::path::Path;

use octofit::Config;
use octofit_cli::{ConfigCommand, OutputFormat};
use serde_json::Value;

#[test]
fn test_show_table_lists_settings_and_root() {
    let config = Config::default().with_codespace_name(Some("fluffy-robot".to_string()));

    let out = ConfigCommand::render(&config, Some(Path::new("octofit.toml")), OutputFormat::Table)
        .unwrap();

    assert!(out.starts_with("Configuration from: octofit.toml"));
    assert!(out.contains("codespace_name"));
    assert!(out.contains("fluffy-robot"));
    assert!(out.contains("(not set)"));
    assert!(out.ends_with("Resolved API root: https://fluffy-robot-8000.app.github.dev/"));
}

#[test]
fn test_show_table_reports_missing_host() {
    let out = ConfigCommand::render(&Config::default(), None, OutputFormat::Table).unwrap();

    assert!(out.starts_with("Configuration: (defaults and discovered files)"));
    assert!(out.contains("Resolved API root: unavailable (Configuration error: No API host"));
}

#[test]
fn test_show_json_includes_endpoints() {
    let config = Config::default().with_base_url(Some("http://localhost:8000".to_string()));

    let out = ConfigCommand::render(&config, None, OutputFormat::Json).unwrap();
    let value: Value = serde_json::from_str(&out).unwrap();

    assert_eq!(value["api"]["base_url"], "http://localhost:8000");
    assert_eq!(value["api"]["port"], 8000);
    assert_eq!(value["resolved_base_url"], "http://localhost:8000/");

    let endpoints: Vec<&str> = value["endpoints"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(
        endpoints,
        [
            "http://localhost:8000/api/users/",
            "http://localhost:8000/api/activities/",
            "http://localhost:8000/api/teams/",
            "http://localhost:8000/api/leaderboard/",
            "http://localhost:8000/api/workouts/",
        ]
    );
}

#[test]
fn test_show_json_without_host_has_no_endpoints() {
    let out = ConfigCommand::render(&Config::default(), None, OutputFormat::Json).unwrap();
    let value: Value = serde_json::from_str(&out).unwrap();

    assert!(value["resolved_base_url"].is_null());
    assert_eq!(value["endpoints"], serde_json::json!([]));
}
