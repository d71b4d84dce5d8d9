use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    pub collected: f64,
    pub pending: f64,
    pub overdue: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_units: u32,
    pub occupied_units: u32,
    pub vacant_units: u32,
    pub occupancy_rate: f64,
    pub late_accounts_count: u32,
    pub total_outstanding: f64,
    pub monthly_revenue: MonthlyRevenue,
}
