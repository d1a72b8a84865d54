//! End-to-end tests for `keel init`.

mod common;

use common::*;
use serde_json::json;

#[test]
fn test_init_records_without_deploying() {
    let env = TestEnv::with_web_manifest();

    let result = env.run(&["init", "app.yaml", "-i", "inputs.yaml"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("Initialized with template app.yaml"));
    assert_eq!(env.read_store("root_file"), "app.yaml");
    assert_eq!(env.stored_json("inputs"), json!({"region": "eu-west-1"}));
    assert!(!env.store_path("instances").exists());
}

#[test]
fn test_deploy_after_init_uses_recorded_template() {
    let env = TestEnv::with_web_manifest();
    assert!(env.run(&["init", "app.yaml", "-i", "inputs.yaml"]).success);

    let result = env.run(&["deploy"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("Template: app.yaml (recorded)"));
    assert!(env.store_path("instances/web.json").exists());
}

#[test]
fn test_init_clean_removes_instances_after_confirmation() {
    let env = TestEnv::with_web_manifest();
    assert!(env
        .run(&["deploy", "app.yaml", "-i", "inputs.yaml"])
        .success);

    let result = env.run_with_stdin(&["init", "app.yaml", "--clean"], "\n");

    assert!(result.success, "{}", result.combined_output());
    assert!(!env.store_path("instances").exists());
    assert_eq!(env.stored_json("inputs"), json!({"region": "eu-west-1"}));
}

#[test]
fn test_init_clean_declined_keeps_instances() {
    let env = TestEnv::with_web_manifest();
    assert!(env
        .run(&["deploy", "app.yaml", "-i", "inputs.yaml"])
        .success);

    let result = env.run_with_stdin(&["init", "other.yaml", "--clean"], "n\n");

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("Init cancelled"));
    assert!(env.store_path("instances/web.json").exists());
    assert_eq!(env.read_store("root_file"), "app.yaml");
}

#[test]
fn test_init_without_clean_leaves_instances() {
    let env = TestEnv::with_web_manifest();
    assert!(env
        .run(&["deploy", "app.yaml", "-i", "inputs.yaml"])
        .success);

    let result = env.run(&["init", "other.yaml"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(env.store_path("instances/web.json").exists());
    assert_eq!(env.read_store("root_file"), "other.yaml");
}
