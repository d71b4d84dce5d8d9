//! Billing records

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Overdue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub tenant_id: String,
    pub unit_id: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<NaiveDate>,
    pub status: PaymentStatus,
    pub billing_period: BillingPeriod,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    #[validate(required, length(min = 1, message = "Tenant is required"))]
    pub tenant_id: Option<String>,
    #[validate(required, length(min = 1, message = "Unit is required"))]
    pub unit_id: Option<String>,
    #[validate(required, range(min = 0.0, message = "Amount cannot be negative"))]
    pub amount: Option<f64>,
    #[validate(required)]
    pub due_date: Option<NaiveDate>,
    #[validate(required)]
    pub billing_period: Option<BillingPeriod>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MarkPaymentPaidRequest {
    #[validate(required)]
    pub paid_date: Option<NaiveDate>,
}

/// Overdue buckets accepted by the payment listing filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DaysOverdueFilter {
    #[serde(rename = "all")]
    All,
    #[serde(rename = "1-15")]
    UpToWarning,
    #[serde(rename = "16-30")]
    UpToCritical,
    #[serde(rename = "30+")]
    Critical,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_overdue: Option<DaysOverdueFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

/// A payment past its due date, joined with tenant and unit labels
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatePayment {
    #[serde(flatten)]
    pub payment: Payment,
    pub days_overdue: u32,
    pub tenant_name: String,
    pub unit_number: String,
}
