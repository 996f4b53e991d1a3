//! Storage for sensors and system status.
//!
//! The alarm controller treats the repository as a durability sink: it
//! writes every change through, but its own cached statuses stay
//! authoritative. Status reads may return `None` when nothing was stored yet.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileRepository;
pub use memory::MemoryRepository;

use crate::security::status::{AlarmStatus, ArmingStatus};
use crate::sensors::Sensor;
use serde::{Deserialize, Serialize};

/// Backing store consumed by the alarm controller.
pub trait SecurityRepository: Send + Sync {
    fn alarm_status(&self) -> Option<AlarmStatus>;

    fn set_alarm_status(&self, status: AlarmStatus);

    fn arming_status(&self) -> Option<ArmingStatus>;

    fn set_arming_status(&self, status: ArmingStatus);

    /// Snapshot of every known sensor, sorted.
    fn sensors(&self) -> Vec<Sensor>;

    fn add_sensor(&self, sensor: Sensor);

    fn remove_sensor(&self, sensor: &Sensor);

    /// Replace the stored copy of `sensor` (matched by identity).
    fn update_sensor(&self, sensor: &Sensor);
}

/// Complete repository state, as kept in memory and written to disk.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RepositorySnapshot {
    #[serde(default)]
    pub alarm_status: Option<AlarmStatus>,
    #[serde(default)]
    pub arming_status: Option<ArmingStatus>,
    #[serde(default)]
    pub sensors: Vec<Sensor>,
}

impl RepositorySnapshot {
    /// Sorted copy of the sensors.
    pub fn sorted_sensors(&self) -> Vec<Sensor> {
        let mut sensors = self.sensors.clone();
        sensors.sort();
        sensors
    }

    /// Insert a sensor, replacing any stored sensor with the same identity.
    pub fn upsert_sensor(&mut self, sensor: Sensor) {
        match self.sensors.iter_mut().find(|s| **s == sensor) {
            Some(existing) => *existing = sensor,
            None => self.sensors.push(sensor),
        }
    }

    pub fn remove_sensor(&mut self, sensor: &Sensor) {
        self.sensors.retain(|s| s != sensor);
    }

    /// Overwrite an existing sensor. Returns false if it is not stored.
    pub fn replace_sensor(&mut self, sensor: &Sensor) -> bool {
        match self.sensors.iter_mut().find(|s| *s == sensor) {
            Some(existing) => {
                *existing = sensor.clone();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::SensorType;

    #[test]
    fn test_upsert_replaces_by_identity() {
        let mut snapshot = RepositorySnapshot::default();
        let mut sensor = Sensor::new("Back Door", SensorType::Door);
        snapshot.upsert_sensor(sensor.clone());

        sensor.set_active(true);
        snapshot.upsert_sensor(sensor.clone());

        assert_eq!(snapshot.sensors.len(), 1);
        assert!(snapshot.sensors[0].is_active());
    }

    #[test]
    fn test_replace_unknown_sensor() {
        let mut snapshot = RepositorySnapshot::default();
        let sensor = Sensor::new("Garage", SensorType::Motion);
        assert!(!snapshot.replace_sensor(&sensor));
        assert!(snapshot.sensors.is_empty());
    }

    #[test]
    fn test_missing_fields_deserialize_as_uninitialized() {
        let snapshot: RepositorySnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.alarm_status.is_none());
        assert!(snapshot.arming_status.is_none());
        assert!(snapshot.sensors.is_empty());
    }
}
