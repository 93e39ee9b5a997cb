//! Tests for completion parameter validation and the scriptable mock.

use finwise_model::error::ModelError;
use finwise_model::llm::{LanguageModel, MAX_TEMPERATURE, validate_params};
use finwise_model::mock::MockModel;

#[test]
fn temperature_bounds_are_inclusive() {
    assert!(validate_params(0.0, 1).is_ok());
    assert!(validate_params(MAX_TEMPERATURE, 1).is_ok());
    assert!(validate_params(0.7, 256).is_ok());
}

#[test]
fn out_of_range_temperature_is_rejected() {
    assert!(matches!(
        validate_params(-0.1, 256),
        Err(ModelError::InvalidParameter(_))
    ));
    assert!(matches!(
        validate_params(2.1, 256),
        Err(ModelError::InvalidParameter(_))
    ));
}

#[test]
fn nan_temperature_is_rejected() {
    assert!(matches!(
        validate_params(f32::NAN, 256),
        Err(ModelError::InvalidParameter(_))
    ));
}

#[test]
fn zero_max_tokens_is_rejected() {
    assert!(matches!(
        validate_params(0.2, 0),
        Err(ModelError::InvalidParameter(_))
    ));
}

#[tokio::test]
async fn mock_echoes_prompt_summary_by_default() {
    let model = MockModel::new();
    let answer = model.complete("How do I budget?", 0.2, 256).await.unwrap();
    assert_eq!(answer, "Answered from 16 characters of prompt.");
    assert_eq!(model.call_count(), 1);
    assert_eq!(model.last_prompt().as_deref(), Some("How do I budget?"));
}

#[tokio::test]
async fn mock_returns_fixed_response_when_scripted() {
    let model = MockModel::with_response("Track spending for one month first.");
    let answer = model.complete("anything", 0.2, 256).await.unwrap();
    assert_eq!(answer, "Track spending for one month first.");
}

#[tokio::test]
async fn failing_mock_reports_unavailable() {
    let model = MockModel::failing();
    let err = model.complete("anything", 0.2, 256).await.unwrap_err();
    assert!(matches!(err, ModelError::Unavailable { .. }));
    // Failed calls are still counted and recorded.
    assert_eq!(model.call_count(), 1);
    assert_eq!(model.last_prompt().as_deref(), Some("anything"));
}

#[tokio::test]
async fn mock_validates_parameters_before_answering() {
    let model = MockModel::new();
    let err = model.complete("anything", 3.0, 256).await.unwrap_err();
    assert!(matches!(err, ModelError::InvalidParameter(_)));
    // Rejected calls never reach the script.
    assert_eq!(model.call_count(), 0);
    assert_eq!(model.last_prompt(), None);
}

#[test]
fn error_display_includes_the_model() {
    let timeout = ModelError::Timeout {
        model: "phi3:mini".to_string(),
        seconds: 120,
    };
    assert_eq!(timeout.to_string(), "model phi3:mini timed out after 120s");

    let unavailable = ModelError::Unavailable {
        model: "phi3:mini".to_string(),
        message: "connection refused".to_string(),
    };
    assert_eq!(
        unavailable.to_string(),
        "model phi3:mini unavailable: connection refused"
    );
}

#[tokio::test]
async fn mock_health_check_is_always_ok() {
    let model = MockModel::failing();
    assert!(model.health_check().await);
}
