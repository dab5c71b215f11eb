//! Test: Validation - bad configs are rejected before any filter runs

use pipeframe::core::{ConfigError, ConfigFormat, PipelineConfig};

/// An empty step graph is always rejected
#[test]
fn test_empty_steps_rejected() {
    for json in [r#"{ "steps": {} }"#, r#"{ "entry": "1", "steps": {} }"#] {
        let err = PipelineConfig::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::EmptySteps), "{}", json);
    }
}

/// Dangling `next` names both the step and the missing id
#[test]
fn test_dangling_next_rejected() {
    let json = r#"{
        "steps": {
            "1": { "filter": "upper", "params": [], "next": "2" },
            "2": { "filter": "exclaim", "params": ["!"], "next": "9" }
        }
    }"#;

    let err = PipelineConfig::from_json(json).unwrap_err();
    match &err {
        ConfigError::DanglingNext { step_id, next } => {
            assert_eq!(step_id, "2");
            assert_eq!(next, "9");
        }
        other => panic!("Expected DanglingNext, got {:?}", other),
    }
    assert!(err.to_string().contains("9"));
}

/// Scalar params are rejected
#[test]
fn test_scalar_params_rejected() {
    for params in [r#""!""#, "1", "true", r#"{ "a": 1 }"#] {
        let json = format!(
            r#"{{ "steps": {{ "1": {{ "filter": "exclaim", "params": {} }} }} }}"#,
            params
        );
        let err = PipelineConfig::from_json(&json).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidParams { ref step_id } if step_id == "1"),
            "params {} should be rejected, got {:?}",
            params,
            err
        );
    }
}

/// Checks run in a fixed order, first failure wins
#[test]
fn test_first_failure_wins() {
    // Missing steps beats everything else
    let err = PipelineConfig::from_json(r#"{ "stepz": { "1": {} } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::MissingSteps));

    // Within one step: filter, then params, then next
    let err = PipelineConfig::from_json(r#"{ "steps": { "1": { "filter": "a", "params": 5, "next": "nope" } } }"#)
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidParams { .. }));
}

/// next cycles are rejected
#[test]
fn test_cycle_rejected() {
    let json = r#"{
        "steps": {
            "1": { "filter": "a", "next": "2" },
            "2": { "filter": "b", "next": "3" },
            "3": { "filter": "c", "next": "2" }
        }
    }"#;

    let err = PipelineConfig::from_json(json).unwrap_err();
    assert!(matches!(err, ConfigError::CyclicNext { ref step_id } if step_id == "2"));
}

/// Malformed text is a parse error in either format
#[test]
fn test_parse_errors() {
    let err = PipelineConfig::parse("{ \"steps\": ", ConfigFormat::Json).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { format: "json", .. }));

    let err = PipelineConfig::parse("steps: [unclosed", ConfigFormat::Yaml).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { format: "yaml", .. }));
}

/// Unquoted numeric ids line up in YAML, while JSON keeps `next` strict
#[test]
fn test_numeric_next_in_yaml() {
    let yaml = "steps:\n  1:\n    filter: upper\n    next: 2\n  2:\n    filter: exclaim\n";
    let config = PipelineConfig::from_yaml(yaml).unwrap();
    assert_eq!(config.step("1").unwrap().next.as_deref(), Some("2"));
    assert_eq!(config.step("2").unwrap().filter, "exclaim");

    let json = r#"{ "steps": { "1": { "filter": "upper", "next": 2 }, "2": { "filter": "exclaim" } } }"#;
    let err = PipelineConfig::from_json(json).unwrap_err();
    assert!(matches!(err, ConfigError::DanglingNext { ref next, .. } if next == "2"));
}

/// YAML files are picked by extension
#[test]
fn test_yaml_file_loaded_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pipeline.yml");
    std::fs::write(
        &path,
        "steps:\n  \"1\":\n    filter: upper\n    params: [a]\n",
    )
    .unwrap();

    let config = PipelineConfig::from_file(&path).unwrap();
    assert_eq!(config.step("1").unwrap().filter, "upper");
}

/// Missing config file
#[test]
fn test_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = PipelineConfig::from_file(dir.path().join("config-filters.json")).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound { .. }));
    assert!(err.to_string().contains("Configuration file not found"));
}
