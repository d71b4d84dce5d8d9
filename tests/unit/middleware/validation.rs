//! Unit tests for validation error flattening

use serde_json::json;
use storage_api::error::FieldError;
use storage_api::middleware::field_errors;
use storage_api::models::{CreateTenantRequest, CreateUnitRequest};
use validator::Validate;

#[test]
fn nested_paths_are_dot_joined_in_wire_case() {
    let request: CreateTenantRequest = serde_json::from_value(json!({
        "firstName": "",
        "lastName": "Doe",
        "email": "not-an-email",
        "phone": "555-0100",
        "address": {"street": "1 Main St", "city": "Springfield", "state": "IL", "zip": ""},
        "unitId": "665f1c2e8a1b2c3d4e5f6a7b",
        "moveInDate": "2024-01-01",
        "monthlyRate": 75.0
    }))
    .unwrap();

    let errors = field_errors(&request.validate().unwrap_err());

    assert_eq!(
        errors,
        vec![
            FieldError::new("address.zip", "Required"),
            FieldError::new("email", "Invalid email"),
            FieldError::new("firstName", "First name is required"),
        ]
    );
}

#[test]
fn empty_body_reports_every_required_field() {
    let request: CreateTenantRequest = serde_json::from_value(json!({})).unwrap();

    let errors = field_errors(&request.validate().unwrap_err());

    let fields: Vec<&str> = errors.iter().map(|error| error.field.as_str()).collect();
    assert_eq!(
        fields,
        vec![
            "address",
            "email",
            "firstName",
            "lastName",
            "monthlyRate",
            "moveInDate",
            "phone",
            "unitId",
        ]
    );
    assert!(errors.iter().all(|error| error.message == "Required"));
}

#[test]
fn absent_dimensions_fail_their_range() {
    let request: CreateUnitRequest = serde_json::from_value(json!({
        "unitNumber": "A-101",
        "size": "small",
        "dimensions": {"width": 5.0, "height": 8.0},
        "monthlyRate": 75.0
    }))
    .unwrap();

    let errors = field_errors(&request.validate().unwrap_err());

    assert_eq!(
        errors,
        vec![FieldError::new("dimensions.depth", "Must be at least 1")]
    );
}

#[test]
fn custom_messages_take_precedence() {
    let request: CreateUnitRequest = serde_json::from_value(json!({
        "unitNumber": "A-101",
        "size": "small",
        "dimensions": {"width": 5.0, "depth": 5.0, "height": 8.0},
        "monthlyRate": -1.0
    }))
    .unwrap();

    let errors = field_errors(&request.validate().unwrap_err());

    assert_eq!(
        errors,
        vec![FieldError::new("monthlyRate", "Monthly rate cannot be negative")]
    );
}

#[test]
fn valid_requests_pass() {
    let request: CreateUnitRequest = serde_json::from_value(json!({
        "unitNumber": "B-204",
        "size": "medium",
        "dimensions": {"width": 10.0, "depth": 10.0, "height": 8.0},
        "monthlyRate": 150.0,
        "features": ["second-floor"]
    }))
    .unwrap();

    assert!(request.validate().is_ok());
}
