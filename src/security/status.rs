//! Alarm and arming status values.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Current alert level of the system.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "kebab-case")]
pub enum AlarmStatus {
    NoAlarm,
    PendingAlarm,
    Alarm,
}

impl AlarmStatus {
    /// Text shown to the occupant for this status.
    pub fn description(&self) -> &'static str {
        match self {
            AlarmStatus::NoAlarm => "Cool and Good",
            AlarmStatus::PendingAlarm => "I'm in Danger...",
            AlarmStatus::Alarm => "Awooga!",
        }
    }
}

/// Whether, and how, the system is armed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "kebab-case")]
pub enum ArmingStatus {
    Disarmed,
    ArmedHome,
    ArmedAway,
}

impl ArmingStatus {
    pub fn description(&self) -> &'static str {
        match self {
            ArmingStatus::Disarmed => "Disarmed",
            ArmingStatus::ArmedHome => "Armed - At Home",
            ArmingStatus::ArmedAway => "Armed - Away",
        }
    }

    /// True for both armed modes.
    pub fn is_armed(&self) -> bool {
        !matches!(self, ArmingStatus::Disarmed)
    }
}
