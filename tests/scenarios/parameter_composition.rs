//! Test: Parameter Composition - prior output is prepended to declared params

use crate::helpers::*;
use serde_json::{json, Value};

/// B is called with exactly [O, p1, p2]
#[tokio::test]
async fn test_prior_output_prepended() {
    let json = r#"{
        "steps": {
            "A": { "filter": "upper", "params": ["o"], "next": "B" },
            "B": { "filter": "echo", "params": ["p1", "p2"] }
        }
    }"#;

    let log = CallLog::new();
    let report = run_json_from(json, "A", &log).await.unwrap();

    let calls = log.calls();
    assert_eq!(calls[0].params, vec![json!("o")]);
    assert_eq!(calls[1].params, vec![json!("O"), json!("p1"), json!("p2")]);
    assert_eq!(report.output, json!(["O", "p1", "p2"]));
}

/// Structured outputs are passed forward unchanged
#[tokio::test]
async fn test_structured_output_passed_forward() {
    let json = r#"{
        "steps": {
            "1": { "filter": "echo", "params": [{ "k": 1 }, [2, 3]], "next": "2" },
            "2": { "filter": "echo", "params": ["tail"] }
        }
    }"#;

    let log = CallLog::new();
    let report = run_json(json, &log).await.unwrap();

    assert_eq!(
        report.output,
        json!([[{ "k": 1 }, [2, 3]], "tail"])
    );
}

/// A null output still occupies the first position
#[tokio::test]
async fn test_null_output_is_prepended() {
    let json = r#"{
        "steps": {
            "1": { "filter": "nothing", "next": "2" },
            "2": { "filter": "count", "params": ["x"] }
        }
    }"#;

    let log = CallLog::new();
    let report = run_json(json, &log).await.unwrap();

    assert_eq!(log.calls()[1].params, vec![Value::Null, json!("x")]);
    assert_eq!(report.output, json!(2));
}

/// Only the immediately preceding output is carried
#[tokio::test]
async fn test_only_previous_output_carried() {
    let json = r#"{
        "steps": {
            "1": { "filter": "upper", "params": ["a"], "next": "2" },
            "2": { "filter": "count", "params": ["b", "c"], "next": "3" },
            "3": { "filter": "echo" }
        }
    }"#;

    let log = CallLog::new();
    let report = run_json(json, &log).await.unwrap();

    assert_eq!(log.calls()[1].params, vec![json!("A"), json!("b"), json!("c")]);
    assert_eq!(report.output, json!([3]));
}
