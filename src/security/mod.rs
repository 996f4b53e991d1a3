//! Alarm decision engine.
//!
//! Combines arming mode, sensor activations and camera cat detection into
//! the authoritative [`AlarmStatus`] and fans status changes out to
//! [`StatusListener`]s.

pub mod controller;
pub mod listener;
pub mod shadow;
pub mod status;

pub use controller::AlarmController;
pub use listener::{ListenerSet, LoggingListener, StatusListener};
pub use shadow::ShadowedStatus;
pub use status::{AlarmStatus, ArmingStatus};
