// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Power consumption categories understood by the battery statistics service.
//!
//! The numeric codes are part of the client contract and never change. They are
//! passed to the service verbatim; nothing in this crate derives meaning from
//! their values.
//!
//! Serialization writes the long symbolic name. Deserialization goes through
//! [`FromStr`], so configuration files may also use the short form (`idle`).

use core::fmt;
use core::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::Error;

const NAME_PREFIX: &str = "CONSUMPTION_TYPE_";

/// Category of a battery statistics entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(i32)]
pub enum ConsumptionType {
    /// Placeholder for entries without a category.
    #[serde(rename = "CONSUMPTION_TYPE_INVALID")]
    Invalid = -17,
    /// Per-application consumption.
    #[serde(rename = "CONSUMPTION_TYPE_APP")]
    App = -16,
    /// Bluetooth radio.
    #[serde(rename = "CONSUMPTION_TYPE_BLUETOOTH")]
    Bluetooth = -15,
    /// CPU idle.
    #[serde(rename = "CONSUMPTION_TYPE_IDLE")]
    Idle = -14,
    /// Voice calls.
    #[serde(rename = "CONSUMPTION_TYPE_PHONE")]
    Phone = -13,
    /// Cellular radio.
    #[serde(rename = "CONSUMPTION_TYPE_RADIO")]
    Radio = -12,
    /// Display panel.
    #[serde(rename = "CONSUMPTION_TYPE_SCREEN")]
    Screen = -11,
    /// Per-user aggregate.
    #[serde(rename = "CONSUMPTION_TYPE_USER")]
    User = -10,
    /// Wi-Fi radio.
    #[serde(rename = "CONSUMPTION_TYPE_WIFI")]
    Wifi = -9,
    /// Camera sensor.
    #[serde(rename = "CONSUMPTION_TYPE_CAMERA")]
    Camera = -8,
    /// Flashlight LED.
    #[serde(rename = "CONSUMPTION_TYPE_FLASHLIGHT")]
    Flashlight = -7,
    /// Audio path.
    #[serde(rename = "CONSUMPTION_TYPE_AUDIO")]
    Audio = -6,
    /// Motion and proximity sensors.
    #[serde(rename = "CONSUMPTION_TYPE_SENSOR")]
    Sensor = -5,
    /// GNSS receiver.
    #[serde(rename = "CONSUMPTION_TYPE_GPS")]
    Gps = -4,
    /// CPU clusters.
    #[serde(rename = "CONSUMPTION_TYPE_CPU")]
    Cpu = -3,
    /// Held wakelocks.
    #[serde(rename = "CONSUMPTION_TYPE_WAKELOCK")]
    Wakelock = -2,
}

impl ConsumptionType {
    /// Every category, in ascending code order.
    pub const ALL: [ConsumptionType; 16] = [
        Self::Invalid,
        Self::App,
        Self::Bluetooth,
        Self::Idle,
        Self::Phone,
        Self::Radio,
        Self::Screen,
        Self::User,
        Self::Wifi,
        Self::Camera,
        Self::Flashlight,
        Self::Audio,
        Self::Sensor,
        Self::Gps,
        Self::Cpu,
        Self::Wakelock,
    ];

    /// Returns the wire code passed to the service.
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Returns the symbolic name, e.g. `CONSUMPTION_TYPE_IDLE`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Invalid => "CONSUMPTION_TYPE_INVALID",
            Self::App => "CONSUMPTION_TYPE_APP",
            Self::Bluetooth => "CONSUMPTION_TYPE_BLUETOOTH",
            Self::Idle => "CONSUMPTION_TYPE_IDLE",
            Self::Phone => "CONSUMPTION_TYPE_PHONE",
            Self::Radio => "CONSUMPTION_TYPE_RADIO",
            Self::Screen => "CONSUMPTION_TYPE_SCREEN",
            Self::User => "CONSUMPTION_TYPE_USER",
            Self::Wifi => "CONSUMPTION_TYPE_WIFI",
            Self::Camera => "CONSUMPTION_TYPE_CAMERA",
            Self::Flashlight => "CONSUMPTION_TYPE_FLASHLIGHT",
            Self::Audio => "CONSUMPTION_TYPE_AUDIO",
            Self::Sensor => "CONSUMPTION_TYPE_SENSOR",
            Self::Gps => "CONSUMPTION_TYPE_GPS",
            Self::Cpu => "CONSUMPTION_TYPE_CPU",
            Self::Wakelock => "CONSUMPTION_TYPE_WAKELOCK",
        }
    }

    /// True for categories that describe a hardware unit rather than an app or user.
    pub const fn is_hardware_unit(self) -> bool {
        !matches!(self, Self::Invalid | Self::App | Self::User)
    }
}

impl TryFrom<i32> for ConsumptionType {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::ALL
            .iter()
            .copied()
            .find(|ty| ty.code() == code)
            .ok_or(Error::InvalidConsumptionType(code))
    }
}

impl From<ConsumptionType> for i32 {
    fn from(ty: ConsumptionType) -> Self {
        ty.code()
    }
}

impl FromStr for ConsumptionType {
    type Err = Error;

    /// Accepts `CONSUMPTION_TYPE_IDLE` as well as the short form `idle`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let short = upper.strip_prefix(NAME_PREFIX).unwrap_or(&upper);
        Self::ALL
            .iter()
            .copied()
            .find(|ty| &ty.name()[NAME_PREFIX.len()..] == short)
            .ok_or_else(|| Error::UnknownConsumptionName(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for ConsumptionType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(de::Error::custom)
    }
}

impl fmt::Display for ConsumptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn codes_match_contract() {
        assert_eq!(ConsumptionType::Invalid.code(), -17);
        assert_eq!(ConsumptionType::Idle.code(), -14);
        assert_eq!(ConsumptionType::Screen.code(), -11);
        assert_eq!(ConsumptionType::Wifi.code(), -9);
        assert_eq!(ConsumptionType::Wakelock.code(), -2);
    }

    #[test]
    fn codes_are_unique() {
        let codes: HashSet<i32> = ConsumptionType::ALL.iter().map(|t| t.code()).collect();
        assert_eq!(codes.len(), ConsumptionType::ALL.len());
    }

    #[test]
    fn names_parse_in_both_forms() {
        assert_eq!("CONSUMPTION_TYPE_IDLE".parse::<ConsumptionType>().unwrap(), ConsumptionType::Idle);
        assert_eq!("wifi".parse::<ConsumptionType>().unwrap(), ConsumptionType::Wifi);
        assert_eq!(" Screen ".parse::<ConsumptionType>().unwrap(), ConsumptionType::Screen);
        let err = "toaster".parse::<ConsumptionType>().expect_err("unknown name");
        assert_eq!(err, Error::UnknownConsumptionName("toaster".to_string()));
    }

    #[test]
    fn unknown_code_rejected() {
        assert_eq!(ConsumptionType::try_from(0), Err(Error::InvalidConsumptionType(0)));
        assert_eq!(ConsumptionType::try_from(-18), Err(Error::InvalidConsumptionType(-18)));
    }

    #[test]
    fn serde_uses_symbolic_name() {
        let json = serde_json::to_string(&ConsumptionType::Radio).unwrap();
        assert_eq!(json, "\"CONSUMPTION_TYPE_RADIO\"");
        let back: ConsumptionType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ConsumptionType::Radio);
    }

    #[test]
    fn deserialize_accepts_what_from_str_accepts() {
        for text in ["\"idle\"", "\"IDLE\"", "\"CONSUMPTION_TYPE_IDLE\""] {
            let ty: ConsumptionType = serde_json::from_str(text).unwrap();
            assert_eq!(ty, ConsumptionType::Idle);
        }
        let err = serde_json::from_str::<ConsumptionType>("\"toaster\"").expect_err("unknown");
        assert!(err.to_string().contains("toaster"));
    }

    proptest! {
        #[test]
        fn try_from_inverts_code(idx in 0usize..16) {
            let ty = ConsumptionType::ALL[idx];
            prop_assert_eq!(ConsumptionType::try_from(ty.code()).unwrap(), ty);
            prop_assert_eq!(ty.name().parse::<ConsumptionType>().unwrap(), ty);
        }
    }
}
