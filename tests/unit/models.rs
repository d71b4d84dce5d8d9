//! Unit tests for shared domain types

use serde_json::json;
use storage_api::models::constants::{DAYS_OVERDUE_CRITICAL, DAYS_OVERDUE_WARNING};
use storage_api::models::{
    ApiCollectionResponse, ApiSuccessResponse, DaysOverdueFilter, HealthResponse,
    OccupationEventType, PaginationMetadata, PaymentStatus, UnitSize,
};

#[test]
fn unit_sizes_carry_catalogue_dimensions_and_rates() {
    let small = UnitSize::Small.dimensions();
    assert_eq!((small.width, small.depth, small.height), (5.0, 5.0, 8.0));
    let large = UnitSize::Large.dimensions();
    assert_eq!((large.width, large.depth, large.height), (10.0, 20.0, 8.0));

    let rates: Vec<f64> = UnitSize::ALL.iter().map(|size| size.monthly_rate()).collect();
    assert_eq!(rates, vec![75.0, 150.0, 250.0]);
}

#[test]
fn overdue_thresholds() {
    assert!(DAYS_OVERDUE_WARNING < DAYS_OVERDUE_CRITICAL);
    assert_eq!(DAYS_OVERDUE_CRITICAL, 30);
}

#[test]
fn pagination_rounds_pages_up() {
    let meta = PaginationMetadata::new(2, 10, 31);
    assert_eq!(meta.total_pages, 4);
    assert_eq!(
        serde_json::to_value(meta).unwrap(),
        json!({"page": 2, "limit": 10, "total": 31, "totalPages": 4})
    );
    assert_eq!(PaginationMetadata::new(1, 0, 5).total_pages, 0);
}

#[test]
fn envelopes_mark_success() {
    let single = serde_json::to_value(ApiSuccessResponse::new(json!({"id": "1"}))).unwrap();
    assert_eq!(single, json!({"success": true, "data": {"id": "1"}}));

    let list = serde_json::to_value(ApiCollectionResponse::new(vec![1, 2])).unwrap();
    assert_eq!(list, json!({"success": true, "data": [1, 2]}));
}

#[test]
fn liveness_omits_database() {
    let body = serde_json::to_value(HealthResponse::liveness()).unwrap();
    assert_eq!(body["status"], "ok");
    assert!(body.get("database").is_none());
    assert!(body["timestamp"].is_string());
}

#[test]
fn readiness_reports_database() {
    let down = serde_json::to_value(HealthResponse::readiness(false)).unwrap();
    assert_eq!(down["status"], "error");
    assert_eq!(down["database"], "disconnected");

    let up = serde_json::to_value(HealthResponse::readiness(true)).unwrap();
    assert_eq!(up["status"], "ok");
    assert_eq!(up["database"], "connected");
}

#[test]
fn enum_wire_names() {
    assert_eq!(serde_json::to_value(PaymentStatus::Overdue).unwrap(), "overdue");
    assert_eq!(serde_json::to_value(OccupationEventType::MoveIn).unwrap(), "move-in");
    assert_eq!(
        serde_json::from_value::<DaysOverdueFilter>(json!("30+")).unwrap(),
        DaysOverdueFilter::Critical
    );
}
