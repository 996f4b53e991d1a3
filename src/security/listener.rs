//! Status listeners notified when the alarm controller changes state.
//!
//! Listeners are held weakly: the controller never keeps an observer alive,
//! and observers that have been dropped are skipped and pruned on the next
//! broadcast.
//!
//! Notification is synchronous. A listener that calls back into the
//! controller while being notified is not supported.

use super::status::AlarmStatus;
use log::{info, warn};
use std::sync::{Arc, Weak};

/// Observer of alarm, sensor and cat-detection events.
pub trait StatusListener: Send + Sync {
    /// The alarm status was set (even if unchanged).
    fn notify(&self, status: AlarmStatus);

    /// A camera image was evaluated for cats.
    fn cat_detected(&self, cat: bool);

    /// Sensor activation state may have changed in bulk.
    fn sensor_status_changed(&self);
}

/// Set of weakly held listeners, de-duplicated by pointer identity.
#[derive(Default)]
pub struct ListenerSet {
    listeners: Vec<Weak<dyn StatusListener>>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Adding the same listener twice has no effect.
    pub fn add(&mut self, listener: &Arc<dyn StatusListener>) {
        let weak = Arc::downgrade(listener);
        if !self.listeners.iter().any(|l| Weak::ptr_eq(l, &weak)) {
            self.listeners.push(weak);
        }
    }

    /// Unregister a listener. Removing an unknown listener has no effect.
    pub fn remove(&mut self, listener: &Arc<dyn StatusListener>) {
        let weak = Arc::downgrade(listener);
        self.listeners.retain(|l| !Weak::ptr_eq(l, &weak));
    }

    /// Number of listeners that are still alive.
    pub fn len(&self) -> usize {
        self.listeners
            .iter()
            .filter(|l| l.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Call `f` on every live listener, dropping dead entries.
    pub fn for_each(&mut self, mut f: impl FnMut(&dyn StatusListener)) {
        self.listeners.retain(|weak| match weak.upgrade() {
            Some(listener) => {
                f(listener.as_ref());
                true
            }
            None => false,
        });
    }
}

/// Listener that writes every event to the log.
pub struct LoggingListener;

impl StatusListener for LoggingListener {
    fn notify(&self, status: AlarmStatus) {
        match status {
            AlarmStatus::Alarm => warn!("[Alarm] {} ({})", status.description(), status),
            _ => info!("[Alarm] {} ({})", status.description(), status),
        }
    }

    fn cat_detected(&self, cat: bool) {
        if cat {
            warn!("[Camera] DANGER - CAT DETECTED");
        } else {
            info!("[Camera] Cat-free camera image");
        }
    }

    fn sensor_status_changed(&self) {
        info!("[Sensors] Sensor status changed");
    }
}
