//! Unit tests for the demo catalogue

use mongodb::bson::DateTime;
use storage_api::db::seed::{demo_units, size_summary};
use storage_api::models::{UnitSize, UnitStatus};

#[test]
fn catalogue_has_ten_units_per_size() {
    let units = demo_units(DateTime::now());

    assert_eq!(units.len(), 30);
    assert_eq!(
        size_summary(&units),
        [
            (UnitSize::Small, 10),
            (UnitSize::Medium, 10),
            (UnitSize::Large, 10)
        ]
    );
}

#[test]
fn seeded_units_are_vacant_at_list_price() {
    for unit in demo_units(DateTime::now()) {
        assert_eq!(unit.status, UnitStatus::Vacant);
        assert_eq!(unit.monthly_rate, unit.size.monthly_rate());
        assert_eq!(unit.dimensions, unit.size.dimensions());
        assert!(!unit.features.is_empty());
    }
}

#[test]
fn buildings_map_to_sizes() {
    for unit in demo_units(DateTime::now()) {
        let expected = match &unit.unit_number[..1] {
            "A" => UnitSize::Small,
            "B" => UnitSize::Medium,
            _ => UnitSize::Large,
        };
        assert_eq!(unit.size, expected, "{}", unit.unit_number);
    }
}

#[test]
fn unit_numbers_are_unique() {
    let units = demo_units(DateTime::now());
    let mut numbers: Vec<&str> = units.iter().map(|unit| unit.unit_number.as_str()).collect();
    numbers.sort_unstable();
    numbers.dedup();
    assert_eq!(numbers.len(), units.len());
}
