// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: Integration tests for the host battery statistics backend
//! OWNERS: @power
//! STATUS: Functional
//! API_STABILITY: Unstable
//! TEST_COVERAGE: 8 integration tests
//!
//! TEST_SCENARIOS:
//!   - value and percent lookups for apps and hardware units
//!   - zero results for unknown keys and empty tables
//!   - aggregate fetch ordering
//!   - unavailable service
//!   - negative power rejected, percent stays within [0, 1]

use batterystats::{
    BatteryStatsClient, BatteryStatsInfo, ConsumptionType, Error, HostBatteryStats, INVALID_UID,
};

fn backend() -> HostBatteryStats {
    HostBatteryStats::with_entries([
        BatteryStatsInfo::app(111, 25.0),
        BatteryStatsInfo::app(1000, 25.0),
        BatteryStatsInfo::hardware_unit(ConsumptionType::Idle, 30.0),
        BatteryStatsInfo::hardware_unit(ConsumptionType::Wifi, 20.0),
    ])
    .expect("seed entries")
}

#[test]
fn app_queries() {
    let stats = backend();
    assert_eq!(stats.get_app_power_value(111).unwrap(), 25.0);
    assert_eq!(stats.get_app_power_percent(111).unwrap(), 0.25);
}

#[test]
fn hardware_unit_queries() {
    let stats = backend();
    assert_eq!(stats.get_hardware_unit_power_value(ConsumptionType::Idle).unwrap(), 30.0);
    assert_eq!(stats.get_hardware_unit_power_percent(ConsumptionType::Wifi).unwrap(), 0.2);
}

#[test]
fn unknown_keys_yield_zero() {
    let stats = backend();
    assert_eq!(stats.get_app_power_value(4242).unwrap(), 0.0);
    assert_eq!(stats.get_app_power_percent(4242).unwrap(), 0.0);
    assert_eq!(stats.get_hardware_unit_power_value(ConsumptionType::Gps).unwrap(), 0.0);

    let empty = HostBatteryStats::new();
    empty.record_app(111, 0.0).unwrap();
    assert_eq!(empty.get_app_power_percent(111).unwrap(), 0.0);
    assert_eq!(empty.get_hardware_unit_power_percent(ConsumptionType::Idle).unwrap(), 0.0);
}

#[tokio::test(flavor = "current_thread")]
async fn aggregate_fetch_sorted_by_power() {
    let stats = backend();
    let list = stats.get_battery_stats().await.expect("fetch");
    assert_eq!(list.len(), 4);
    assert_eq!(list[0].consumption_type, ConsumptionType::Idle);
    assert_eq!(list[0].uid, INVALID_UID);
    assert!(list.windows(2).all(|w| w[0].power_mah >= w[1].power_mah));
}

#[tokio::test(flavor = "current_thread")]
async fn unavailable_service_fails_every_query() {
    let stats = backend();
    stats.set_available(false);
    assert_eq!(stats.get_app_power_value(111), Err(Error::ServiceUnavailable));
    assert_eq!(stats.get_app_power_percent(111), Err(Error::ServiceUnavailable));
    assert_eq!(
        stats.get_hardware_unit_power_value(ConsumptionType::Idle),
        Err(Error::ServiceUnavailable)
    );
    assert_eq!(
        stats.get_hardware_unit_power_percent(ConsumptionType::Idle),
        Err(Error::ServiceUnavailable)
    );
    assert_eq!(stats.get_battery_stats().await, Err(Error::ServiceUnavailable));

    stats.set_available(true);
    assert!(stats.get_battery_stats().await.is_ok());
}

#[test]
fn raw_codes_resolve_before_querying() {
    let stats = backend();
    let category = ConsumptionType::try_from(-14).expect("idle code");
    assert_eq!(stats.get_hardware_unit_power_value(category).unwrap(), 30.0);
    assert_eq!(ConsumptionType::try_from(7), Err(Error::InvalidConsumptionType(7)));
}

#[test]
fn negative_power_cannot_skew_percent() {
    let stats = HostBatteryStats::new();
    stats.record_hardware_unit(ConsumptionType::Idle, 10.0).unwrap();
    let err = stats.record_hardware_unit(ConsumptionType::Screen, -20.0).expect_err("negative");
    assert_eq!(err, Error::InvalidPower(-20.0));
    assert_eq!(stats.total_power_mah(), 10.0);
    assert_eq!(stats.get_hardware_unit_power_percent(ConsumptionType::Idle).unwrap(), 1.0);
}

#[test]
fn seeding_stops_on_invalid_entry() {
    let result = HostBatteryStats::with_entries([
        BatteryStatsInfo::app(111, 5.0),
        BatteryStatsInfo::app(222, f64::NAN),
    ]);
    assert!(matches!(result, Err(Error::InvalidPower(p)) if p.is_nan()));
}
