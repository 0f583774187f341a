// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! The battery statistics latency cases.
//!
//! Each case binds one client entry point to the harness. Cases differ only in
//! name, entry point and argument; the measurement itself is shared.

use batterystats::{BatteryStatsClient, BatteryStatsInfo, ConsumptionType, HostBatteryStats};
use serde::Serialize;

use crate::clock::{Clock, HostClock};
use crate::config::SuiteConfig;
use crate::harness::{BenchError, BenchResult};

/// Client entry point exercised by a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatsApi {
    /// `get_app_power_value(app_uid)`
    AppPowerValue,
    /// `get_app_power_percent(app_uid)`
    AppPowerPercent,
    /// `get_hardware_unit_power_value(category)`
    HardwareUnitPowerValue,
    /// `get_hardware_unit_power_percent(category)`
    HardwareUnitPowerPercent,
    /// `get_battery_stats()`, awaited
    BatteryStats,
}

impl StatsApi {
    /// Client method name.
    pub fn method(self) -> &'static str {
        match self {
            Self::AppPowerValue => "get_app_power_value",
            Self::AppPowerPercent => "get_app_power_percent",
            Self::HardwareUnitPowerValue => "get_hardware_unit_power_value",
            Self::HardwareUnitPowerPercent => "get_hardware_unit_power_percent",
            Self::BatteryStats => "get_battery_stats",
        }
    }

    /// True for the entry point that returns a future.
    pub fn is_async(self) -> bool {
        matches!(self, Self::BatteryStats)
    }
}

/// A named benchmark case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchCase {
    /// Stable case identifier.
    pub name: &'static str,
    /// Entry point measured.
    pub api: StatsApi,
}

/// Every case of the suite, in execution order.
pub static CASES: [BenchCase; 5] = [
    BenchCase { name: "battery_stats_performance_001", api: StatsApi::AppPowerValue },
    BenchCase { name: "battery_stats_performance_002", api: StatsApi::AppPowerPercent },
    BenchCase { name: "battery_stats_performance_003", api: StatsApi::HardwareUnitPowerValue },
    BenchCase { name: "battery_stats_performance_004", api: StatsApi::HardwareUnitPowerPercent },
    BenchCase { name: "battery_stats_performance_005", api: StatsApi::BatteryStats },
];

/// Looks a case up by name.
pub fn find_case(name: &str) -> Option<&'static BenchCase> {
    CASES.iter().find(|case| case.name == name)
}

/// Outcome of one completed case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseReport {
    /// Case identifier.
    pub name: &'static str,
    /// Entry point measured.
    pub api: StatsApi,
    /// Timing and verdict.
    #[serde(flatten)]
    pub result: BenchResult,
}

/// Runs `case` against `client` on the host clock.
pub async fn run_case<C>(
    client: &C,
    case: &BenchCase,
    config: &SuiteConfig,
) -> Result<CaseReport, BenchError>
where
    C: BatteryStatsClient,
{
    run_case_with(&HostClock::new(), client, case, config).await
}

/// Runs `case` against `client`, timing with `clock`.
pub async fn run_case_with<K, C>(
    clock: &K,
    client: &C,
    case: &BenchCase,
    config: &SuiteConfig,
) -> Result<CaseReport, BenchError>
where
    K: Clock,
    C: BatteryStatsClient,
{
    let uid = config.app_uid;
    let category = config.category;
    let result = match case.api {
        StatsApi::AppPowerValue => {
            config.sync_config()?.run_sync_with(clock, || client.get_app_power_value(uid))?
        }
        StatsApi::AppPowerPercent => {
            config.sync_config()?.run_sync_with(clock, || client.get_app_power_percent(uid))?
        }
        StatsApi::HardwareUnitPowerValue => config
            .sync_config()?
            .run_sync_with(clock, || client.get_hardware_unit_power_value(category))?,
        StatsApi::HardwareUnitPowerPercent => config
            .sync_config()?
            .run_sync_with(clock, || client.get_hardware_unit_power_percent(category))?,
        StatsApi::BatteryStats => {
            config.async_config()?.run_async_with(clock, || client.get_battery_stats()).await?
        }
    };
    log::info!(
        "{}: {} wait time {:.3} ms, {:.3} us/call",
        case.name,
        case.api.method(),
        result.total_elapsed_millis,
        result.average_micros
    );
    Ok(CaseReport { name: case.name, api: case.api, result })
}

/// Runs `cases` in order. A failing case does not stop the ones after it.
pub async fn run_cases<C>(
    client: &C,
    config: &SuiteConfig,
    cases: &[&'static BenchCase],
) -> Vec<(&'static BenchCase, Result<CaseReport, BenchError>)>
where
    C: BatteryStatsClient,
{
    let mut outcomes = Vec::with_capacity(cases.len());
    for &case in cases {
        let outcome = run_case(client, case, config).await;
        match &outcome {
            Ok(report) if !report.result.passed => {
                log::warn!(
                    "{}: average {:.3} us not below {} us",
                    case.name,
                    report.result.average_micros,
                    report.result.threshold_micros
                );
            }
            Err(err) => log::warn!("{}: {}", case.name, err),
            Ok(_) => {}
        }
        outcomes.push((case, outcome));
    }
    outcomes
}

/// Runs every case in [`CASES`]. Use [`run_cases`] for a subset.
pub async fn run_suite<C>(
    client: &C,
    config: &SuiteConfig,
) -> Vec<(&'static BenchCase, Result<CaseReport, BenchError>)>
where
    C: BatteryStatsClient,
{
    let all: Vec<&'static BenchCase> = CASES.iter().collect();
    run_cases(client, config, &all).await
}

/// Host backend seeded with a handful of apps and hardware units.
pub fn sample_backend() -> batterystats::Result<HostBatteryStats> {
    HostBatteryStats::with_entries([
        BatteryStatsInfo::app(111, 42.5),
        BatteryStatsInfo::app(1000, 118.0),
        BatteryStatsInfo::app(10_010, 7.25),
        BatteryStatsInfo::hardware_unit(ConsumptionType::Idle, 64.0),
        BatteryStatsInfo::hardware_unit(ConsumptionType::Screen, 210.0),
        BatteryStatsInfo::hardware_unit(ConsumptionType::Wifi, 31.5),
        BatteryStatsInfo::hardware_unit(ConsumptionType::Radio, 55.0),
        BatteryStatsInfo::hardware_unit(ConsumptionType::Bluetooth, 9.0),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_names_are_unique_and_resolvable() {
        for case in &CASES {
            assert_eq!(find_case(case.name), Some(case));
        }
        assert_eq!(find_case("battery_stats_performance_999"), None);
    }

    #[test]
    fn only_the_aggregate_case_is_async() {
        let asyncs: Vec<_> = CASES.iter().filter(|c| c.api.is_async()).collect();
        assert_eq!(asyncs.len(), 1);
        assert_eq!(asyncs[0].api.method(), "get_battery_stats");
    }

    #[test]
    fn report_serializes_flat() {
        let report = CaseReport {
            name: CASES[0].name,
            api: CASES[0].api,
            result: BenchResult {
                repetitions: 4,
                total_elapsed_millis: 2.0,
                average_micros: 500.0,
                threshold_micros: 70_000.0,
                passed: true,
            },
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["name"], "battery_stats_performance_001");
        assert_eq!(json["api"], "app_power_value");
        assert_eq!(json["average_micros"], 500.0);
        assert_eq!(json["passed"], true);
    }
}
