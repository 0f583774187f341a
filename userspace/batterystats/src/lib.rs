// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: Battery statistics client contract used by host-first latency suites
//! OWNERS: @power
//! STATUS: Functional
//! API_STABILITY: Unstable
//! TEST_COVERAGE: Unit tests per module, integration tests in `tests/`
//!
//! The crate exposes the query surface of the battery statistics service:
//! four synchronous power lookups and one asynchronous aggregate fetch. With
//! the `backend-host` feature (default) an in-memory [`HostBatteryStats`]
//! answers those queries so callers can be exercised without the platform
//! service.
//!
//! INVARIANTS:
//! - Consumption codes are fixed and opaque
//! - Queries for unknown uids or categories yield `0.0`, not an error
//! - Recorded power is finite and non-negative, so totals never go below zero

#![forbid(unsafe_code)]
#![deny(clippy::all, missing_docs)]

pub mod consumption;
#[cfg(feature = "backend-host")]
pub mod host;

use core::future::Future;

use serde::{Deserialize, Serialize};

pub use consumption::ConsumptionType;
#[cfg(feature = "backend-host")]
pub use host::HostBatteryStats;

/// Uid carried by entries that do not belong to an application.
pub const INVALID_UID: i32 = -1;

/// Result alias for battery statistics queries.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors produced by battery statistics clients.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum Error {
    /// The numeric code does not name a consumption category.
    #[error("invalid consumption type code {0}")]
    InvalidConsumptionType(i32),
    /// The symbolic name does not name a consumption category.
    #[error("unknown consumption type name `{0}`")]
    UnknownConsumptionName(String),
    /// Recorded power must be finite and not negative.
    #[error("invalid power {0} mAh")]
    InvalidPower(f64),
    /// The statistics service cannot be reached.
    #[error("battery statistics service unavailable")]
    ServiceUnavailable,
}

/// One entry of the aggregate battery statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatteryStatsInfo {
    /// Owning application uid, or [`INVALID_UID`] for hardware units.
    pub uid: i32,
    /// Category of the entry.
    pub consumption_type: ConsumptionType,
    /// Consumed charge in mAh.
    pub power_mah: f64,
}

impl BatteryStatsInfo {
    /// Creates an application entry.
    pub fn app(uid: i32, power_mah: f64) -> Self {
        Self { uid, consumption_type: ConsumptionType::App, power_mah }
    }

    /// Creates a hardware unit entry.
    pub fn hardware_unit(consumption_type: ConsumptionType, power_mah: f64) -> Self {
        Self { uid: INVALID_UID, consumption_type, power_mah }
    }
}

/// Query surface of the battery statistics service.
///
/// Return values are plain numbers; callers decide what to do with them.
pub trait BatteryStatsClient {
    /// Charge consumed by the application `uid`, in mAh.
    fn get_app_power_value(&self, uid: i32) -> Result<f64>;

    /// Share of total consumption attributed to `uid`, in `[0, 1]`.
    fn get_app_power_percent(&self, uid: i32) -> Result<f64>;

    /// Charge consumed by the hardware unit `category`, in mAh.
    fn get_hardware_unit_power_value(&self, category: ConsumptionType) -> Result<f64>;

    /// Share of total consumption attributed to `category`, in `[0, 1]`.
    fn get_hardware_unit_power_percent(&self, category: ConsumptionType) -> Result<f64>;

    /// Fetches every statistics entry.
    fn get_battery_stats(&self) -> impl Future<Output = Result<Vec<BatteryStatsInfo>>> + Send;
}
