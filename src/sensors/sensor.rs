//! Door, window and motion sensors.
//!
//! A sensor's identity is its id. The `active` flag changes over the sensor's
//! lifetime without affecting equality, hashing or its place in a collection.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use strum::{Display, EnumString};
use uuid::Uuid;

/// Kind of physical input a sensor represents.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SensorType {
    Door,
    Window,
    Motion,
}

/// A single sensor with a mutable activation flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sensor {
    id: Uuid,
    name: String,
    sensor_type: SensorType,
    active: bool,
}

impl Sensor {
    /// Create a new, inactive sensor with a fresh id.
    pub fn new(name: impl Into<String>, sensor_type: SensorType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            sensor_type,
            active: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sensor_type(&self) -> SensorType {
        self.sensor_type
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl PartialEq for Sensor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Sensor {}

impl Hash for Sensor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Ord for Sensor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then(self.sensor_type.cmp(&other.sensor_type))
            .then(self.id.cmp(&other.id))
    }
}

impl PartialOrd for Sensor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
