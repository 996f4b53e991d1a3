//! Alarm decision logic.
//!
//! [`AlarmController`] combines the arming mode, sensor activations and
//! camera cat detection into a single alarm status, writes every change
//! through to the repository and notifies registered listeners.
//!
//! The controller keeps its own copies of the alarm and arming status. The
//! repository only receives writes; its values never override the cache.
//!
//! All mutators take `&mut self`. For use from several threads, wrap the
//! controller in one `parking_lot::Mutex` so each operation runs as a single
//! critical section.

use super::listener::{ListenerSet, StatusListener};
use super::shadow::ShadowedStatus;
use super::status::{AlarmStatus, ArmingStatus};
use crate::image::{CAT_CONFIDENCE_THRESHOLD, CameraImage, ImageClassifier};
use crate::repository::SecurityRepository;
use crate::sensors::Sensor;
use log::{debug, info};
use std::sync::Arc;

/// Computes and publishes the alarm status of the home.
pub struct AlarmController {
    repository: Arc<dyn SecurityRepository>,
    classifier: Arc<dyn ImageClassifier>,
    listeners: ListenerSet,
    alarm_status: ShadowedStatus<AlarmStatus>,
    arming_status: ShadowedStatus<ArmingStatus>,
    /// A cat was seen while disarmed; arming afterwards raises the alarm.
    cat_seen_while_disarmed: bool,
}

impl AlarmController {
    /// Create a controller that starts disarmed with no alarm.
    pub fn new(
        repository: Arc<dyn SecurityRepository>,
        classifier: Arc<dyn ImageClassifier>,
    ) -> Self {
        Self {
            repository,
            classifier,
            listeners: ListenerSet::new(),
            alarm_status: ShadowedStatus::new(AlarmStatus::NoAlarm),
            arming_status: ShadowedStatus::new(ArmingStatus::Disarmed),
            cat_seen_while_disarmed: false,
        }
    }

    /// Seed the cached statuses from whatever the repository holds.
    ///
    /// Nothing is written back and no listener is notified.
    pub fn restore(&mut self) {
        if let Some(status) = self.repository.alarm_status() {
            self.alarm_status.set(status);
        }
        if let Some(status) = self.repository.arming_status() {
            self.arming_status.set(status);
        }
        info!(
            "Restored state: {}, {}",
            self.arming_status.cached().description(),
            self.alarm_status.cached().description()
        );
    }

    /// Set the arming mode.
    ///
    /// Disarming clears the alarm. Arming raises the alarm if a cat was seen
    /// while disarmed, then resets every sensor to inactive.
    pub fn set_arming_status(&mut self, status: ArmingStatus) {
        info!("Arming status -> {}", status.description());
        self.arming_status.set(status);
        self.repository.set_arming_status(status);

        if status.is_armed() {
            if self.cat_seen_while_disarmed {
                info!("Cat was seen while disarmed, raising alarm");
                self.set_alarm_status(AlarmStatus::Alarm);
            }
            // The override above must land before the sweep reads the status.
            for mut sensor in self.sensors() {
                self.change_sensor_activation_status(&mut sensor, false);
            }
        } else {
            self.set_alarm_status(AlarmStatus::NoAlarm);
        }

        self.listeners.for_each(|l| l.sensor_status_changed());
    }

    /// Run the camera image through the classifier and react to the verdict.
    pub fn process_image(&mut self, image: &CameraImage) {
        let cat = self
            .classifier
            .contains_cat(image, CAT_CONFIDENCE_THRESHOLD);
        debug!("Classifier verdict: cat={}", cat);
        self.cat_detected(cat);
    }

    fn cat_detected(&mut self, cat: bool) {
        if self.arming_status().is_armed() {
            if self.cat_seen_while_disarmed {
                self.set_alarm_status(AlarmStatus::Alarm);
                self.cat_seen_while_disarmed = false;
            } else if cat {
                self.set_alarm_status(AlarmStatus::Alarm);
            } else if self.repository.sensors().iter().any(Sensor::is_active) {
                debug!("No cat, but a sensor is active; alarm status unchanged");
            } else {
                self.set_alarm_status(AlarmStatus::NoAlarm);
            }
        } else {
            if cat {
                self.cat_seen_while_disarmed = true;
            }
            self.set_alarm_status(AlarmStatus::NoAlarm);
        }

        self.listeners.for_each(|l| l.cat_detected(cat));
    }

    /// Change a sensor's activation state and update the alarm if needed.
    ///
    /// `sensor` is updated in place and then written to the repository.
    /// Re-activating an already active sensor while an alarm is pending
    /// escalates straight to [`AlarmStatus::Alarm`] and stores nothing.
    pub fn change_sensor_activation_status(&mut self, sensor: &mut Sensor, active: bool) {
        if active && sensor.is_active() && self.alarm_status() == AlarmStatus::PendingAlarm {
            debug!("Sensor {} retriggered while pending", sensor.name());
            self.set_alarm_status(AlarmStatus::Alarm);
            return;
        }

        match (sensor.is_active(), active) {
            (false, true) => {
                debug!("Sensor {} activated", sensor.name());
                self.handle_sensor_activated();
            }
            (true, false) => {
                debug!("Sensor {} deactivated", sensor.name());
                sensor.set_active(false);
                self.handle_sensor_deactivated(sensor);
            }
            _ => {}
        }

        sensor.set_active(active);
        self.repository.update_sensor(sensor);
    }

    fn handle_sensor_activated(&mut self) {
        let status = self.alarm_status();
        if status == AlarmStatus::Alarm || !self.arming_status().is_armed() {
            return;
        }

        match status {
            AlarmStatus::NoAlarm => self.set_alarm_status(AlarmStatus::PendingAlarm),
            AlarmStatus::PendingAlarm => self.set_alarm_status(AlarmStatus::Alarm),
            AlarmStatus::Alarm => {}
        }
    }

    fn handle_sensor_deactivated(&mut self, sensor: &Sensor) {
        let status = self.alarm_status();
        if status == AlarmStatus::Alarm {
            return;
        }

        let any_other_active = self
            .repository
            .sensors()
            .iter()
            .filter(|s| *s != sensor)
            .any(Sensor::is_active);
        if any_other_active || sensor.is_active() {
            return;
        }

        match status {
            AlarmStatus::PendingAlarm => self.set_alarm_status(AlarmStatus::NoAlarm),
            // Unreachable while the Alarm guard above stands.
            AlarmStatus::Alarm => self.set_alarm_status(AlarmStatus::PendingAlarm),
            AlarmStatus::NoAlarm => {}
        }
    }

    /// Set the alarm status, store it and notify every listener.
    pub fn set_alarm_status(&mut self, status: AlarmStatus) {
        info!("Alarm status -> {}", status);
        self.alarm_status.set(status);
        self.repository.set_alarm_status(status);
        self.listeners.for_each(|l| l.notify(status));
    }

    pub fn add_status_listener(&mut self, listener: &Arc<dyn StatusListener>) {
        self.listeners.add(listener);
    }

    pub fn remove_status_listener(&mut self, listener: &Arc<dyn StatusListener>) {
        self.listeners.remove(listener);
    }

    pub fn alarm_status(&self) -> AlarmStatus {
        self.alarm_status.resolve(self.repository.alarm_status())
    }

    pub fn arming_status(&self) -> ArmingStatus {
        self.arming_status.resolve(self.repository.arming_status())
    }

    /// Copy of every known sensor. Changes to the copies are not stored.
    pub fn sensors(&self) -> Vec<Sensor> {
        self.repository.sensors()
    }

    pub fn add_sensor(&mut self, sensor: Sensor) {
        info!("Adding sensor {} ({})", sensor.name(), sensor.sensor_type());
        self.repository.add_sensor(sensor);
    }

    pub fn remove_sensor(&mut self, sensor: &Sensor) {
        info!("Removing sensor {}", sensor.name());
        self.repository.remove_sensor(sensor);
    }
}
