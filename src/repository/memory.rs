//! In-memory repository.

use super::{RepositorySnapshot, SecurityRepository};
use crate::security::status::{AlarmStatus, ArmingStatus};
use crate::sensors::Sensor;
use log::debug;
use parking_lot::RwLock;

/// Repository that keeps everything in memory.
///
/// Statuses start uninitialized (`None`) until first written.
#[derive(Default)]
pub struct MemoryRepository {
    state: RwLock<RepositorySnapshot>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing snapshot.
    pub fn with_snapshot(snapshot: RepositorySnapshot) -> Self {
        Self {
            state: RwLock::new(snapshot),
        }
    }
}

impl SecurityRepository for MemoryRepository {
    fn alarm_status(&self) -> Option<AlarmStatus> {
        self.state.read().alarm_status
    }

    fn set_alarm_status(&self, status: AlarmStatus) {
        self.state.write().alarm_status = Some(status);
    }

    fn arming_status(&self) -> Option<ArmingStatus> {
        self.state.read().arming_status
    }

    fn set_arming_status(&self, status: ArmingStatus) {
        self.state.write().arming_status = Some(status);
    }

    fn sensors(&self) -> Vec<Sensor> {
        self.state.read().sorted_sensors()
    }

    fn add_sensor(&self, sensor: Sensor) {
        self.state.write().upsert_sensor(sensor);
    }

    fn remove_sensor(&self, sensor: &Sensor) {
        self.state.write().remove_sensor(sensor);
    }

    fn update_sensor(&self, sensor: &Sensor) {
        if !self.state.write().replace_sensor(sensor) {
            debug!("Ignoring update for unknown sensor {}", sensor.name());
        }
    }
}
