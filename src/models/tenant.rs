//! Tenant occupancy types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TenantStatus {
    Active,
    Inactive,
}

/// Postal address; absent parts decode as empty and fail validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct TenantAddress {
    #[validate(length(min = 1, message = "Required"))]
    pub street: String,
    #[validate(length(min = 1, message = "Required"))]
    pub city: String,
    #[validate(length(min = 1, message = "Required"))]
    pub state: String,
    #[validate(length(min = 1, message = "Required"))]
    pub zip: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: TenantAddress,
    pub unit_id: String,
    pub move_in_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_out_date: Option<NaiveDate>,
    pub monthly_rate: f64,
    pub status: TenantStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tenant {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTenantRequest {
    #[validate(required, length(min = 1, message = "First name is required"))]
    pub first_name: Option<String>,
    #[validate(required, length(min = 1, message = "Last name is required"))]
    pub last_name: Option<String>,
    #[validate(required, email(message = "Invalid email"))]
    pub email: Option<String>,
    #[validate(required, length(min = 1, message = "Phone is required"))]
    pub phone: Option<String>,
    #[validate(required, nested)]
    pub address: Option<TenantAddress>,
    #[validate(required, length(min = 1, message = "Unit is required"))]
    pub unit_id: Option<String>,
    #[validate(required)]
    pub move_in_date: Option<NaiveDate>,
    #[validate(required, range(min = 0.0, message = "Monthly rate cannot be negative"))]
    pub monthly_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTenantRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Invalid email"))]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub address: Option<TenantAddress>,
}

/// Move a new tenant into a vacant unit
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OccupyUnitRequest {
    #[validate(required, length(min = 1, message = "First name is required"))]
    pub tenant_first_name: Option<String>,
    #[validate(required, length(min = 1, message = "Last name is required"))]
    pub tenant_last_name: Option<String>,
    #[validate(required, email(message = "Invalid email"))]
    pub email: Option<String>,
    #[validate(required, length(min = 1, message = "Phone is required"))]
    pub phone: Option<String>,
    #[validate(required)]
    pub move_in_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub address: Option<TenantAddress>,
}
