//! Move-in / move-out history

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OccupationEventType {
    MoveIn,
    MoveOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupationLog {
    pub id: String,
    pub unit_id: String,
    pub tenant_id: String,
    pub event_type: OccupationEventType,
    pub event_date: NaiveDate,
    pub monthly_rate_at_event: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOccupationLogRequest {
    #[validate(length(min = 1, message = "Unit is required"))]
    pub unit_id: String,
    #[validate(length(min = 1, message = "Tenant is required"))]
    pub tenant_id: String,
    pub event_type: OccupationEventType,
    pub event_date: NaiveDate,
    #[validate(range(min = 0.0, message = "Monthly rate cannot be negative"))]
    pub monthly_rate_at_event: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
