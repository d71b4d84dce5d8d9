//! Facility-wide constants

use super::unit::UnitDimensions;

/// Catalogue entry for one unit size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitSpec {
    pub dimensions: UnitDimensions,
    pub monthly_rate: f64,
}

pub const SMALL_UNIT: UnitSpec = UnitSpec {
    dimensions: UnitDimensions {
        width: 5.0,
        depth: 5.0,
        height: 8.0,
    },
    monthly_rate: 75.0,
};

pub const MEDIUM_UNIT: UnitSpec = UnitSpec {
    dimensions: UnitDimensions {
        width: 10.0,
        depth: 10.0,
        height: 8.0,
    },
    monthly_rate: 150.0,
};

pub const LARGE_UNIT: UnitSpec = UnitSpec {
    dimensions: UnitDimensions {
        width: 10.0,
        depth: 20.0,
        height: 8.0,
    },
    monthly_rate: 250.0,
};

/// Days past due before an account is flagged
pub const DAYS_OVERDUE_WARNING: u32 = 15;
pub const DAYS_OVERDUE_CRITICAL: u32 = 30;
