//! Test: Command Filters - filters discovered from a directory of programs

#![cfg(unix)]

use pipeframe::core::PipelineConfig;
use pipeframe::execution::{ExecutionError, PipelineExecutor};
use pipeframe::filter::discover;
use serde_json::json;
use std::os::unix::fs::{symlink, PermissionsExt};
use std::path::Path;

fn write_program(dir: &Path, name: &str, body: &str) {
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

/// End to end: discover programs, validate, run
#[tokio::test]
async fn test_pipeline_of_programs() {
    let dir = tempfile::tempdir().unwrap();
    write_program(dir.path(), "upper.sh", "#!/bin/sh\ntr '[:lower:]' '[:upper:]'\n");
    symlink("/bin/cat", dir.path().join("collect")).unwrap();

    let registry = discover(dir.path()).unwrap();
    let config = PipelineConfig::from_json(
        r#"{
            "steps": {
                "1": { "filter": "upper", "params": ["hello"], "next": "2" },
                "2": { "filter": "collect", "params": ["!"] }
            }
        }"#,
    )
    .unwrap();

    let report = PipelineExecutor::new(registry).execute(&config).await.unwrap();
    assert_eq!(report.output, json!([["HELLO"], "!"]));
}

/// A program exiting non-zero fails its step
#[tokio::test]
async fn test_failing_program() {
    let dir = tempfile::tempdir().unwrap();
    symlink("/bin/cat", dir.path().join("collect")).unwrap();
    symlink("/bin/false", dir.path().join("broken")).unwrap();

    let registry = discover(dir.path()).unwrap();
    let config = PipelineConfig::from_json(
        r#"{
            "steps": {
                "1": { "filter": "collect", "next": "2" },
                "2": { "filter": "broken" }
            }
        }"#,
    )
    .unwrap();

    let err = PipelineExecutor::new(registry).execute(&config).await.unwrap_err();
    assert_eq!(err, ExecutionError::StepExecution { step_id: "2".to_string() });
}
