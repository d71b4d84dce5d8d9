//! Unit tests for error translation

use axum::http::StatusCode;
use mongodb::bson::oid::ObjectId;
use serde_json::json;
use storage_api::config::Environment;
use storage_api::error::{translate, ApiError, AppError, FieldError, GENERIC_ERROR_MESSAGE};

#[derive(Debug, thiserror::Error)]
#[error("pool exhausted")]
struct PoolError(#[source] std::io::Error);

fn pool_error() -> AppError {
    AppError::unexpected(PoolError(std::io::Error::new(
        std::io::ErrorKind::TimedOut,
        "timed out waiting for a connection",
    )))
}

#[test]
fn domain_error_maps_to_its_own_status_and_code() {
    let err: AppError = ApiError::not_found("X").into();

    let (status, envelope) = translate(&err, Environment::Development);

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        serde_json::to_value(&envelope).unwrap(),
        json!({"success": false, "error": {"code": "NOT_FOUND", "message": "X"}})
    );
}

#[test]
fn domain_error_details_are_included_when_present() {
    let err: AppError = ApiError::new(StatusCode::CONFLICT, "UNIT_OCCUPIED", "Unit is occupied")
        .with_details(json!({"unitNumber": "A-101"}))
        .into();

    let (status, envelope) = translate(&err, Environment::Production);

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(envelope.error.details, Some(json!({"unitNumber": "A-101"})));
}

#[test]
fn field_level_validation_errors_are_listed() {
    let err: AppError = ApiError::validation(
        "Invalid request data",
        vec![FieldError::new("email", "Invalid email")],
    )
    .into();

    let (status, envelope) = translate(&err, Environment::Development);

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(envelope.error.code, "VALIDATION_ERROR");
    assert_eq!(
        envelope.error.details,
        Some(json!([{"field": "email", "message": "Invalid email"}]))
    );
}

#[test]
fn driver_schema_failures_are_validation_errors() {
    let err = AppError::Validation("Document failed validation".to_string());

    let (status, envelope) = translate(&err, Environment::Development);

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(envelope.error.code, "VALIDATION_ERROR");
    assert_eq!(envelope.error.message, "Validation failed");
    assert_eq!(envelope.error.details, Some(json!("Document failed validation")));
}

#[test]
fn malformed_object_ids_are_invalid_id() {
    let err: AppError = ObjectId::parse_str("not-an-object-id").unwrap_err().into();

    let (status, envelope) = translate(&err, Environment::Development);

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(envelope.error.code, "INVALID_ID");
    assert_eq!(envelope.error.message, "Invalid resource ID");
}

#[test]
fn unexpected_errors_are_hidden_in_production() {
    let err = pool_error();

    let (status, envelope) = translate(&err, Environment::Production);

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(envelope.error.code, "INTERNAL_ERROR");
    assert_ne!(envelope.error.message, err.to_string());
    assert_eq!(envelope.error.message, GENERIC_ERROR_MESSAGE);
    assert_eq!(envelope.error.stack, None);
}

#[test]
fn unexpected_errors_keep_detail_outside_production() {
    let err = pool_error();

    let (_, envelope) = translate(&err, Environment::Development);

    assert_eq!(envelope.error.message, "pool exhausted");
    let stack = envelope.error.stack.expect("stack outside production");
    assert!(stack.contains("timed out waiting for a connection"));
}
