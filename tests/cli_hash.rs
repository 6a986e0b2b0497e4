//! `registry-reconcile hash`

mod common;

use common::*;

#[test]
fn hash_prints_a_sha256_of_the_data_block() {
    let env = TestEnv::new();
    env.write("user.yml", &user_schema("1-0-0"));

    let result = env.run(&["hash", "user.yml"]);

    assert!(result.success, "{}", result.combined_output());
    let hash = result.stdout.trim();
    assert_eq!(hash.len(), 64);
    assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn hash_ignores_key_order_meta_and_number_form() {
    let env = TestEnv::new();
    env.write("user.yml", &user_schema("1-0-0"));
    env.write(
        "user.json",
        r#"{
  "resourceType": "data-structure",
  "apiVersion": "v1",
  "meta": {"hidden": true, "schemaType": "event"},
  "data": {
    "type": "object",
    "properties": {"id": {"maxLength": 36.0, "type": "string"}},
    "self": {"version": "1-0-0", "format": "jsonschema", "name": "user", "vendor": "com.acme"},
    "$schema": "http://iglucentral.com/schemas/com.snowplowanalytics.self-desc/schema/jsonschema/1-0-0#"
  }
}"#,
    );

    let yaml = env.run(&["hash", "user.yml"]);
    let json = env.run(&["hash", "user.json"]);

    assert!(yaml.success && json.success);
    assert_eq!(yaml.stdout, json.stdout);
}

#[test]
fn hash_json_output() {
    let env = TestEnv::new();
    env.write("user.yml", &user_schema("1-0-0"));

    let result = env.run(&["hash", "user.yml", "--json"]);

    assert!(result.success, "{}", result.combined_output());
    let json = result.stdout_json();
    assert_eq!(json["file"], "user.yml");
    assert_eq!(json["hash"].as_str().map(str::len), Some(64));
}

#[test]
fn hash_of_unreadable_file_fails() {
    let env = TestEnv::new();
    env.write("broken.yml", "data: [1, 2\n");

    let result = env.run(&["hash", "broken.yml"]);

    assert!(!result.success);
    assert!(result.stderr.contains("failed to decode"), "{}", result.stderr);
}
