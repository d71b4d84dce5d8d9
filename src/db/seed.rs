//! Demo unit catalogue used by the `seed` binary

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::models::{UnitDimensions, UnitSize, UnitStatus};

const GROUND_FLOOR: &str = "ground-floor";
const SECOND_FLOOR: &str = "second-floor";
const CORNER_UNIT: &str = "corner-unit";
const CLIMATE_CONTROLLED: &str = "climate-controlled";
const DRIVE_UP: &str = "drive-up";

/// Number, size and features of every seeded unit
pub const DEMO_UNITS: [(&str, UnitSize, &[&str]); 30] = [
    // Building A
    ("A-101", UnitSize::Small, &[GROUND_FLOOR]),
    ("A-102", UnitSize::Small, &[GROUND_FLOOR]),
    ("A-103", UnitSize::Small, &[GROUND_FLOOR, CORNER_UNIT]),
    ("A-104", UnitSize::Small, &[GROUND_FLOOR]),
    ("A-105", UnitSize::Small, &[GROUND_FLOOR]),
    ("A-201", UnitSize::Small, &[SECOND_FLOOR]),
    ("A-202", UnitSize::Small, &[SECOND_FLOOR]),
    ("A-203", UnitSize::Small, &[SECOND_FLOOR, CORNER_UNIT]),
    ("A-204", UnitSize::Small, &[SECOND_FLOOR]),
    ("A-205", UnitSize::Small, &[SECOND_FLOOR]),
    // Building B
    ("B-101", UnitSize::Medium, &[GROUND_FLOOR, CLIMATE_CONTROLLED]),
    ("B-102", UnitSize::Medium, &[GROUND_FLOOR, CLIMATE_CONTROLLED]),
    ("B-103", UnitSize::Medium, &[GROUND_FLOOR, CLIMATE_CONTROLLED, CORNER_UNIT]),
    ("B-104", UnitSize::Medium, &[GROUND_FLOOR]),
    ("B-105", UnitSize::Medium, &[GROUND_FLOOR]),
    ("B-201", UnitSize::Medium, &[SECOND_FLOOR, CLIMATE_CONTROLLED]),
    ("B-202", UnitSize::Medium, &[SECOND_FLOOR, CLIMATE_CONTROLLED]),
    ("B-203", UnitSize::Medium, &[SECOND_FLOOR]),
    ("B-204", UnitSize::Medium, &[SECOND_FLOOR]),
    ("B-205", UnitSize::Medium, &[SECOND_FLOOR, CORNER_UNIT]),
    // Building C
    ("C-101", UnitSize::Large, &[GROUND_FLOOR, CLIMATE_CONTROLLED, DRIVE_UP]),
    ("C-102", UnitSize::Large, &[GROUND_FLOOR, CLIMATE_CONTROLLED, DRIVE_UP]),
    ("C-103", UnitSize::Large, &[GROUND_FLOOR, DRIVE_UP]),
    ("C-104", UnitSize::Large, &[GROUND_FLOOR, DRIVE_UP]),
    (
        "C-105",
        UnitSize::Large,
        &[GROUND_FLOOR, CLIMATE_CONTROLLED, DRIVE_UP, CORNER_UNIT],
    ),
    ("C-201", UnitSize::Large, &[SECOND_FLOOR, CLIMATE_CONTROLLED]),
    ("C-202", UnitSize::Large, &[SECOND_FLOOR, CLIMATE_CONTROLLED]),
    ("C-203", UnitSize::Large, &[SECOND_FLOOR]),
    ("C-204", UnitSize::Large, &[SECOND_FLOOR]),
    ("C-205", UnitSize::Large, &[SECOND_FLOOR, CORNER_UNIT]),
];

/// Stored shape of a unit document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitRecord {
    pub unit_number: String,
    pub size: UnitSize,
    pub dimensions: UnitDimensions,
    pub monthly_rate: f64,
    pub status: UnitStatus,
    pub features: Vec<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl UnitRecord {
    pub fn vacant(unit_number: &str, size: UnitSize, features: &[&str], now: DateTime) -> Self {
        Self {
            unit_number: unit_number.to_string(),
            size,
            dimensions: size.dimensions(),
            monthly_rate: size.monthly_rate(),
            status: UnitStatus::Vacant,
            features: features.iter().map(|feature| feature.to_string()).collect(),
            created_at: now,
            updated_at: now,
        }
    }
}

pub fn demo_units(now: DateTime) -> Vec<UnitRecord> {
    DEMO_UNITS
        .iter()
        .map(|(number, size, features)| UnitRecord::vacant(number, *size, features, now))
        .collect()
}

/// Seeded unit count per size, in [`UnitSize::ALL`] order
pub fn size_summary(units: &[UnitRecord]) -> [(UnitSize, usize); 3] {
    UnitSize::ALL.map(|size| (size, units.iter().filter(|unit| unit.size == size).count()))
}
