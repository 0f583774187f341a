// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! In-memory battery statistics backend for host builds.
//!
//! Entries are keyed by `(consumption_type, uid)`. Percent queries divide by the
//! total of every non-user entry; user entries aggregate their apps and would
//! otherwise be counted twice.

use core::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use serde_json::{Map, Value};

use crate::{BatteryStatsClient, BatteryStatsInfo, ConsumptionType, Error, Result};

/// Host backend answering queries from a table of recorded entries.
pub struct HostBatteryStats {
    entries: RwLock<Vec<BatteryStatsInfo>>,
    available: AtomicBool,
}

impl Default for HostBatteryStats {
    fn default() -> Self {
        Self { entries: RwLock::new(Vec::new()), available: AtomicBool::new(true) }
    }
}

impl HostBatteryStats {
    /// Creates an empty, available backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend pre-populated with `entries`.
    ///
    /// Fails on the first entry [`record`](Self::record) rejects.
    pub fn with_entries(entries: impl IntoIterator<Item = BatteryStatsInfo>) -> Result<Self> {
        let stats = Self::new();
        for info in entries {
            stats.record(info)?;
        }
        Ok(stats)
    }

    /// Inserts `info`, replacing any entry with the same type and uid.
    ///
    /// Negative or non-finite power is rejected.
    pub fn record(&self, info: BatteryStatsInfo) -> Result<()> {
        if !info.power_mah.is_finite() || info.power_mah < 0.0 {
            log::warn!("batterystats: rejected {} mAh for {}", info.power_mah, info.consumption_type);
            return Err(Error::InvalidPower(info.power_mah));
        }
        let mut entries = self.entries.write();
        match entries
            .iter_mut()
            .find(|e| e.consumption_type == info.consumption_type && e.uid == info.uid)
        {
            Some(existing) => existing.power_mah = info.power_mah,
            None => entries.push(info),
        }
        Ok(())
    }

    /// Records the consumption of application `uid`.
    pub fn record_app(&self, uid: i32, power_mah: f64) -> Result<()> {
        self.record(BatteryStatsInfo::app(uid, power_mah))
    }

    /// Records the consumption of a hardware unit.
    ///
    /// Rejects categories that do not describe hardware (app, user, invalid).
    pub fn record_hardware_unit(&self, category: ConsumptionType, power_mah: f64) -> Result<()> {
        if !category.is_hardware_unit() {
            return Err(Error::InvalidConsumptionType(category.code()));
        }
        self.record(BatteryStatsInfo::hardware_unit(category, power_mah))
    }

    /// Drops every recorded entry.
    pub fn reset(&self) {
        self.entries.write().clear();
        log::debug!("batterystats: reset");
    }

    /// Marks the backend reachable or not; unreachable backends fail every query.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::Release);
    }

    /// Total consumption across all non-user entries, in mAh.
    pub fn total_power_mah(&self) -> f64 {
        total_of(&self.entries.read())
    }

    /// Serializes recorded power keyed by uid (apps) or type code (hardware).
    ///
    /// User entries are omitted.
    pub fn dump_json(&self) -> Value {
        let entries = self.entries.read();
        let mut root = Map::new();
        for info in entries.iter() {
            let key = match info.consumption_type {
                ConsumptionType::User => continue,
                ConsumptionType::App => info.uid.to_string(),
                other => other.code().to_string(),
            };
            root.insert(key, Value::from(info.power_mah));
        }
        Value::Object(root)
    }

    fn ensure_available(&self) -> Result<()> {
        if self.available.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(Error::ServiceUnavailable)
        }
    }

    fn snapshot(&self) -> Result<Vec<BatteryStatsInfo>> {
        self.ensure_available()?;
        let mut list = self.entries.read().clone();
        list.sort_by(|a, b| b.power_mah.total_cmp(&a.power_mah));
        Ok(list)
    }
}

fn total_of(entries: &[BatteryStatsInfo]) -> f64 {
    entries
        .iter()
        .filter(|e| e.consumption_type != ConsumptionType::User)
        .map(|e| e.power_mah)
        .sum()
}

fn share(power: f64, total: f64) -> f64 {
    if total > 0.0 {
        power / total
    } else {
        0.0
    }
}

impl BatteryStatsClient for HostBatteryStats {
    fn get_app_power_value(&self, uid: i32) -> Result<f64> {
        self.ensure_available()?;
        let entries = self.entries.read();
        let power = entries
            .iter()
            .find(|e| e.consumption_type == ConsumptionType::App && e.uid == uid)
            .map_or(0.0, |e| e.power_mah);
        log::debug!("batterystats: app power {power} mAh for uid {uid}");
        Ok(power)
    }

    fn get_app_power_percent(&self, uid: i32) -> Result<f64> {
        self.ensure_available()?;
        let entries = self.entries.read();
        let total = total_of(&entries);
        let percent = entries
            .iter()
            .find(|e| e.consumption_type == ConsumptionType::App && e.uid == uid)
            .map_or(0.0, |e| share(e.power_mah, total));
        log::debug!("batterystats: app percent {percent} for uid {uid}");
        Ok(percent)
    }

    fn get_hardware_unit_power_value(&self, category: ConsumptionType) -> Result<f64> {
        self.ensure_available()?;
        let entries = self.entries.read();
        let power = entries
            .iter()
            .find(|e| e.consumption_type == category)
            .map_or(0.0, |e| e.power_mah);
        log::debug!("batterystats: {category} power {power} mAh");
        Ok(power)
    }

    fn get_hardware_unit_power_percent(&self, category: ConsumptionType) -> Result<f64> {
        self.ensure_available()?;
        let entries = self.entries.read();
        let total = total_of(&entries);
        let percent = entries
            .iter()
            .find(|e| e.consumption_type == category)
            .map_or(0.0, |e| share(e.power_mah, total));
        log::debug!("batterystats: {category} percent {percent}");
        Ok(percent)
    }

    fn get_battery_stats(&self) -> impl Future<Output = Result<Vec<BatteryStatsInfo>>> + Send {
        let snapshot = self.snapshot();
        async move {
            // Resolve on a later poll, like a reply arriving from the service.
            tokio::task::yield_now().await;
            snapshot
        }
    }
}
