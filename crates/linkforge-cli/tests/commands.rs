//! Integration tests for the command handlers: artifact written only on
//! full success, nothing written in check mode or on any failure.

use linkforge_cli::build::{run as build, BuildArgs};
use linkforge_cli::check::{run as check, CheckArgs};

const VALID_YAML: &str = r#"
- id: '1'
  provider: mapsearch
  display: Map Search
  url: https://maps.example.com/{value:urlEncode}
  types: [gps-coordinates]
  payWall: Free
"#;

const INVALID_YAML: &str = r#"
- id: '1'
  provider: mapsearch
  url: https://maps.example.com/{value}
  types: [gps-coordinates]
  payWall: Free
"#;

#[test]
fn test_build_writes_artifact_on_success() {
    let dir = tempfile::tempdir().unwrap();
    let links = dir.path().join("links");
    std::fs::create_dir(&links).unwrap();
    std::fs::write(links.join("maps.yaml"), VALID_YAML).unwrap();
    let out = dir.path().join("links.json");

    build(&BuildArgs {
        links_dir: links,
        out: out.clone(),
    })
    .unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(parsed["Maps"][0]["id"], "1");
}

#[test]
fn test_build_writes_nothing_on_validation_failure() {
    let dir = tempfile::tempdir().unwrap();
    let links = dir.path().join("links");
    std::fs::create_dir(&links).unwrap();
    std::fs::write(links.join("maps.yaml"), INVALID_YAML).unwrap();
    let out = dir.path().join("links.json");

    let err = build(&BuildArgs {
        links_dir: links,
        out: out.clone(),
    })
    .unwrap_err();
    assert_eq!(err.issues().len(), 1);
    assert!(!out.exists(), "artifact must not be written on failure");
}

#[test]
fn test_check_reports_success_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let links = dir.path().join("links");
    std::fs::create_dir(&links).unwrap();
    std::fs::write(links.join("maps.yaml"), VALID_YAML).unwrap();

    check(&CheckArgs {
        links_dir: links.clone(),
    })
    .unwrap();
    assert!(!dir.path().join("links.json").exists());
}

#[test]
fn test_check_fails_with_collected_errors() {
    let dir = tempfile::tempdir().unwrap();
    let links = dir.path().join("links");
    std::fs::create_dir(&links).unwrap();
    std::fs::write(links.join("maps.yaml"), INVALID_YAML).unwrap();

    let err = check(&CheckArgs { links_dir: links }).unwrap_err();
    let msg = err.issues()[0].to_string();
    assert!(msg.contains("'display'"));
}
