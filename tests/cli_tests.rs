use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

const DASHBOARDS: [&str; 4] = [
    "built/perses/perses-overview",
    "built/prometheus/prometheus-overview",
    "built/blackbox-exporter/blackbox-exporter",
    "built/demo-app/demo-app",
];
const RULES: &str = "built/rules/blackbox-exporter/blackbox-exporter-rules";

fn mixins(dir: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("monitoring-mixins");
    cmd.current_dir(dir).env_remove("MONITORING_MIXINS_CONFIG");
    cmd
}

fn read_yaml(path: &Path) -> serde_json::Value {
    let content = fs::read_to_string(path).unwrap();
    serde_yaml_bw::from_str(&content).unwrap()
}

#[test]
fn test_cli_help() {
    let temp = TempDir::new().unwrap();
    mixins(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generate Perses dashboards"))
        .stdout(predicate::str::contains("--project"))
        .stdout(predicate::str::contains("--cluster-label-name"))
        .stdout(predicate::str::contains("--output-rules-dir"));
}

#[test]
fn test_cli_version() {
    let temp = TempDir::new().unwrap();
    mixins(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("monitoring-mixins"));
}

#[test]
fn test_default_run_writes_yaml() {
    let temp = TempDir::new().unwrap();
    mixins(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 4 dashboards"))
        .stdout(predicate::str::contains("Wrote 1 rule to"));

    for name in DASHBOARDS {
        let path = temp.path().join(format!("{}.yaml", name));
        let dashboard = read_yaml(&path);
        assert_eq!(dashboard["kind"], "Dashboard");
        assert_eq!(dashboard["metadata"]["project"], "default");
    }

    let rule = read_yaml(&temp.path().join(format!("{}.yaml", RULES)));
    assert_eq!(rule["kind"], "PrometheusRule");
    assert_eq!(rule["metadata"]["namespace"], "default");
}

#[test]
fn test_json_output_and_custom_dirs() {
    let temp = TempDir::new().unwrap();
    mixins(temp.path())
        .args([
            "--project",
            "perses",
            "--output",
            "json",
            "--output-dir",
            "out/dashboards",
            "--output-rules",
            "json",
            "--output-rules-dir",
            "out/rules",
        ])
        .assert()
        .success();

    let content =
        fs::read_to_string(temp.path().join("out/dashboards/demo-app/demo-app.json")).unwrap();
    assert!(content.ends_with('\n'));
    let dashboard: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(dashboard["metadata"]["project"], "perses");
    assert_eq!(dashboard["spec"]["duration"], "15m");

    assert!(
        temp.path()
            .join("out/rules/blackbox-exporter/blackbox-exporter-rules.json")
            .is_file()
    );
    assert!(!temp.path().join("built").exists());
}

#[test]
fn test_cluster_label_scopes_queries() {
    let temp = TempDir::new().unwrap();
    mixins(temp.path())
        .args(["--cluster-label-name", "k8s_cluster", "--datasource", "prom"])
        .assert()
        .success();

    let dashboard = read_yaml(&temp.path().join("built/prometheus/prometheus-overview.yaml"));
    let panels = dashboard["spec"]["panels"].as_object().unwrap();
    for panel in panels.values() {
        for query in panel["spec"]["queries"].as_array().unwrap() {
            let spec = &query["spec"]["plugin"]["spec"];
            assert!(spec["query"].as_str().unwrap().contains(r#"k8s_cluster="$cluster""#));
            assert_eq!(spec["datasource"]["kind"], "PrometheusDatasource");
            assert_eq!(spec["datasource"]["name"], "prom");
        }
    }

    let variables = dashboard["spec"]["variables"].as_array().unwrap();
    assert_eq!(variables[0]["spec"]["name"], "cluster");
    assert_eq!(
        variables[0]["spec"]["plugin"]["spec"]["labelName"],
        "k8s_cluster"
    );
}

#[test]
fn test_repeated_runs_are_identical() {
    let temp = TempDir::new().unwrap();
    mixins(temp.path()).assert().success();
    let first = fs::read(temp.path().join(format!("{}.yaml", DASHBOARDS[0]))).unwrap();

    mixins(temp.path()).assert().success();
    let second = fs::read(temp.path().join(format!("{}.yaml", DASHBOARDS[0]))).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_format_flags_ignore_case() {
    let temp = TempDir::new().unwrap();
    mixins(temp.path())
        .args(["--output", "JSON", "--output-rules", "Yaml"])
        .assert()
        .success();

    assert!(temp.path().join("built/demo-app/demo-app.json").is_file());
    assert!(
        temp.path()
            .join(format!("{}.yaml", RULES))
            .is_file()
    );
}

#[test]
fn test_unknown_format_fails_before_writing() {
    let temp = TempDir::new().unwrap();
    mixins(temp.path())
        .args(["--output", "toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("toml"));

    assert!(!temp.path().join("built").exists());
}

#[test]
fn test_output_dir_is_a_file() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("built"), "not a directory").unwrap();

    mixins(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("built"))
        .stderr(predicate::str::contains("not a directory"));
}

#[test]
fn test_invalid_project_fails() {
    let temp = TempDir::new().unwrap();
    mixins(temp.path())
        .args(["--project", "my project"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration validation failed"));

    assert!(!temp.path().join("built").exists());
}

#[test]
fn test_config_file_from_env() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("mixins.toml"),
        "project = \"from-file\"\n\n[dashboards]\nformat = \"json\"\n",
    )
    .unwrap();

    mixins(temp.path())
        .env("MONITORING_MIXINS_CONFIG", "mixins.toml")
        .args(["--project", "from-cli"])
        .assert()
        .success();

    let content =
        fs::read_to_string(temp.path().join("built/demo-app/demo-app.json")).unwrap();
    let dashboard: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(dashboard["metadata"]["project"], "from-cli");
}
