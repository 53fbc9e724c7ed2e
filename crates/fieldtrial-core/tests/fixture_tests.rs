//! Fixture tests: resolve the checked-in test config and compare the
//! emitter-facing document against the expected output files.

use fieldtrial_core::{transform, ElementsOptions, TrialConfig};
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn expected(name: &str) -> Value {
    let content = std::fs::read_to_string(fixture(name)).expect("read expected output");
    serde_json::from_str(&content).expect("parse expected output")
}

fn resolve(config_file: &str, platform: &str) -> Value {
    let config = TrialConfig::from_path(&fixture(config_file)).expect("load fixture config");
    transform(&config, platform)
        .expect("transform fixture config")
        .to_elements(&ElementsOptions::default())
}

#[test]
fn windows_output_matches_fixture() {
    assert_eq!(resolve("test_config.json", "windows"), expected("expected_windows.json"));
}

#[test]
fn mac_output_matches_fixture() {
    assert_eq!(resolve("test_config.json", "mac"), expected("expected_mac.json"));
}

#[test]
fn yaml_config_resolves_like_json() {
    for platform in ["windows", "mac", "android", "ios", "linux"] {
        assert_eq!(
            resolve("test_config.yaml", platform),
            resolve("test_config.json", platform),
            "platform {}",
            platform
        );
    }
}

#[test]
fn study_order_follows_document_order() {
    let output = resolve("test_config.json", "windows");
    let names: Vec<&str> = output["elements"]["kFieldTrialConfig"]["studies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["TestStudy1", "TestStudy2", "TestStudy4"]);
}

#[test]
fn platform_without_studies_yields_empty_list() {
    let output = resolve("test_config.json", "fuchsia");
    assert_eq!(
        output["elements"]["kFieldTrialConfig"]["studies"],
        Value::Array(vec![])
    );
}
