//! Domain types shared between the API and its clients.

pub mod api;
pub mod constants;
pub mod dashboard;
pub mod occupation_log;
pub mod payment;
pub mod tenant;
pub mod unit;

pub use api::{
    ApiCollectionResponse, ApiSuccessResponse, DatabaseStatus, HealthResponse, HealthStatus,
    PaginationMetadata,
};
pub use dashboard::{DashboardSummary, MonthlyRevenue};
pub use occupation_log::{CreateOccupationLogRequest, OccupationEventType, OccupationLog};
pub use payment::{
    BillingPeriod, CreatePaymentRequest, DaysOverdueFilter, LatePayment, MarkPaymentPaidRequest,
    Payment, PaymentFilters, PaymentStatus,
};
pub use tenant::{
    CreateTenantRequest, OccupyUnitRequest, Tenant, TenantAddress, TenantStatus,
    UpdateTenantRequest,
};
pub use unit::{
    CreateUnitRequest, Unit, UnitDimensions, UnitFilters, UnitSize, UnitSizeFilter, UnitStatus,
    UnitStatusFilter, UpdateUnitRequest,
};
