//! `registry-reconcile plan`

mod common;

use common::*;

#[test]
fn plan_without_snapshot_creates_everything() {
    let env = TestEnv::new();
    env.write("data-structures/user.yml", &user_schema("1-0-0"));

    let result = env.run(&["plan", "--ascii"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("Plan for DEV: 1 change(s)"), "{}", result.stdout);
    assert!(result.stdout.contains("+ com.acme/user/jsonschema 1-0-0  (data-structures/user.yml)"));
}

#[test]
fn plan_reports_insufficient_version_bump() {
    let env = TestEnv::new();
    env.write("data-structures/user.yml", &user_schema("1-0-1"));
    env.write("registry.yml", &user_snapshot("1-0-0", "DEV"));

    let result = env.run(&["plan", "--snapshot", "registry.yml", "--ascii"]);

    assert_eq!(result.exit_code, 1, "{}", result.combined_output());
    assert!(result.stdout.contains("~ com.acme/user/jsonschema 1-0-0 -> 1-0-1"));
    assert!(result.stdout.contains("redshift: suggested version 2-0-0"));
    assert!(result.stdout.contains("- maxLength decreased"));
    assert!(!result.stdout.contains("snowflake"));
}

#[test]
fn plan_accepts_a_sufficient_bump() {
    let env = TestEnv::new();
    env.write("data-structures/user.yml", &user_schema("2-0-0"));
    env.write("registry.yml", &user_snapshot("1-0-0", "DEV"));

    let result = env.run(&["plan", "--snapshot", "registry.yml", "--json"]);

    assert!(result.success, "{}", result.combined_output());
    let json = result.stdout_json();
    assert_eq!(json["success"], true);
    let updates = json["plan"]["changes"]["toUpdateNewVersion"].as_array().unwrap();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0]["remoteVersion"], "1-0-0");
    assert!(json["plan"]["migrations"].as_object().unwrap().is_empty());
}

#[test]
fn plan_refuses_patches_on_prod() {
    let env = TestEnv::new();
    env.write("data-structures/user.yml", &user_schema("1-0-0"));
    env.write("registry.yml", &user_snapshot("1-0-0", "PROD"));

    let result = env.run(&["plan", "--snapshot", "registry.yml", "--env", "prod"]);

    assert!(!result.success);
    assert!(
        result.stderr.contains("patching is not available on prod"),
        "{}",
        result.stderr
    );
}

#[test]
fn plan_lists_every_broken_file() {
    let env = TestEnv::new();
    env.write("data-structures/a.yml", &user_schema("1-0"));
    env.write("data-structures/b.yml", "apiVersion: [\n");

    let result = env.run(&["plan", "--ascii"]);

    assert_eq!(result.exit_code, 1);
    assert!(result.stdout.contains("[FAIL] data-structures/a.yml"), "{}", result.stdout);
    assert!(result.stdout.contains("[FAIL] data-structures/b.yml"), "{}", result.stdout);
}

#[test]
fn plan_explicit_paths_are_relative_to_the_working_directory() {
    let env = TestEnv::new();
    env.mkdir(".reconcile");
    env.write("schemas/user.yml", &user_schema("1-0-0"));

    let result = env.run_from_with_env(&env.project_path("schemas"), &["plan", "user.yml"], &[]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("(schemas/user.yml)"), "{}", result.stdout);
}

#[test]
fn plan_missing_snapshot_fails() {
    let env = TestEnv::new();
    env.write("data-structures/user.yml", &user_schema("1-0-0"));

    let result = env.run(&["plan", "--snapshot", "nope.yml"]);

    assert!(!result.success);
    assert!(result.stderr.contains("path not found"), "{}", result.stderr);
}
