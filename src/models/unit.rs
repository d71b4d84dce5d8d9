//! Storage unit inventory types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::constants::{LARGE_UNIT, MEDIUM_UNIT, SMALL_UNIT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSize {
    Small,
    Medium,
    Large,
}

impl UnitSize {
    pub const ALL: [UnitSize; 3] = [UnitSize::Small, UnitSize::Medium, UnitSize::Large];

    /// Standard footprint for this size, in feet
    pub fn dimensions(self) -> UnitDimensions {
        match self {
            UnitSize::Small => SMALL_UNIT.dimensions,
            UnitSize::Medium => MEDIUM_UNIT.dimensions,
            UnitSize::Large => LARGE_UNIT.dimensions,
        }
    }

    /// List price per month, in USD
    pub fn monthly_rate(self) -> f64 {
        match self {
            UnitSize::Small => SMALL_UNIT.monthly_rate,
            UnitSize::Medium => MEDIUM_UNIT.monthly_rate,
            UnitSize::Large => LARGE_UNIT.monthly_rate,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UnitSize::Small => "small",
            UnitSize::Medium => "medium",
            UnitSize::Large => "large",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitStatus {
    Vacant,
    Occupied,
}

/// Footprint in feet; absent sides decode as zero and fail validation
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct UnitDimensions {
    #[validate(range(min = 1.0, message = "Must be at least 1"))]
    pub width: f64,
    #[validate(range(min = 1.0, message = "Must be at least 1"))]
    pub depth: f64,
    #[validate(range(min = 1.0, message = "Must be at least 1"))]
    pub height: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: String,
    pub unit_number: String,
    pub size: UnitSize,
    pub dimensions: UnitDimensions,
    pub monthly_rate: f64,
    pub status: UnitStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_tenant_id: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUnitRequest {
    #[validate(required, length(min = 1, message = "Unit number is required"))]
    pub unit_number: Option<String>,
    #[validate(required)]
    pub size: Option<UnitSize>,
    #[validate(required, nested)]
    pub dimensions: Option<UnitDimensions>,
    #[validate(required, range(min = 0.0, message = "Monthly rate cannot be negative"))]
    pub monthly_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUnitRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Unit number is required"))]
    pub unit_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<UnitSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub dimensions: Option<UnitDimensions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "Monthly rate cannot be negative"))]
    pub monthly_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSizeFilter {
    All,
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitStatusFilter {
    All,
    Vacant,
    Occupied,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<UnitSizeFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<UnitStatusFilter>,
}
