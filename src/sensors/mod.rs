//! Sensor definitions shared by the repository and the alarm controller.
//!
//! Sensors are plain values owned by the repository. The controller reads
//! and writes their activation state and reflects every change back.

pub mod sensor;

pub use sensor::{Sensor, SensorType};
