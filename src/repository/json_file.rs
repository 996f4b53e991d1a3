//! JSON file repository.
//!
//! Keeps the full [`RepositorySnapshot`] in memory and rewrites the file
//! after every mutation. A missing file is a first run. A file that cannot
//! be parsed is moved aside to `<name>.bak` before starting from an empty
//! state, so later saves never overwrite it. Saves go to `<name>.tmp` first
//! and are renamed into place.

use super::{RepositorySnapshot, SecurityRepository};
use crate::error::Result;
use crate::security::status::{AlarmStatus, ArmingStatus};
use crate::sensors::Sensor;
use log::{debug, error, info, warn};
use parking_lot::RwLock;
use std::fs;
use std::path::{Path, PathBuf};

/// `path` with `suffix` appended to its file name.
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

/// Where an unparsable state file is moved.
pub fn backup_path(path: &Path) -> PathBuf {
    sibling(path, ".bak")
}

impl RepositorySnapshot {
    /// Load from file
    pub fn load(path: &Path) -> Self {
        match fs::read(path) {
            Ok(bytes) => match serde_json::from_slice::<RepositorySnapshot>(&bytes) {
                Ok(state) => {
                    info!("Loaded {} sensors from {:?}", state.sensors.len(), path);
                    state
                }
                Err(e) => {
                    warn!("Failed to parse security state file: {}", e);
                    let backup = backup_path(path);
                    match fs::rename(path, &backup) {
                        Ok(()) => warn!("Moved unreadable state to {:?}", backup),
                        Err(e) => error!("Failed to back up {:?}: {}", path, e),
                    }
                    Self::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No saved security state found (first run)");
                Self::default()
            }
            Err(e) => {
                error!("Failed to read security state file: {}", e);
                Self::default()
            }
        }
    }

    /// Save to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(self)?;
        let tmp = sibling(path, ".tmp");
        fs::write(&tmp, data)?;
        if let Err(e) = fs::rename(&tmp, path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        debug!("Saved security state to {:?}", path);
        Ok(())
    }
}

/// Repository persisted as a single JSON document.
pub struct JsonFileRepository {
    path: PathBuf,
    state: RwLock<RepositorySnapshot>,
}

impl JsonFileRepository {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = RepositorySnapshot::load(&path);
        Self {
            path,
            state: RwLock::new(state),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the current state now, reporting failure to the caller.
    pub fn flush(&self) -> Result<()> {
        self.state.read().save(&self.path)
    }

    fn mutate(&self, f: impl FnOnce(&mut RepositorySnapshot)) {
        let mut state = self.state.write();
        f(&mut state);
        if let Err(e) = state.save(&self.path) {
            error!("Failed to save security state: {}", e);
        }
    }
}

impl SecurityRepository for JsonFileRepository {
    fn alarm_status(&self) -> Option<AlarmStatus> {
        self.state.read().alarm_status
    }

    fn set_alarm_status(&self, status: AlarmStatus) {
        self.mutate(|s| s.alarm_status = Some(status));
    }

    fn arming_status(&self) -> Option<ArmingStatus> {
        self.state.read().arming_status
    }

    fn set_arming_status(&self, status: ArmingStatus) {
        self.mutate(|s| s.arming_status = Some(status));
    }

    fn sensors(&self) -> Vec<Sensor> {
        self.state.read().sorted_sensors()
    }

    fn add_sensor(&self, sensor: Sensor) {
        self.mutate(|s| s.upsert_sensor(sensor));
    }

    fn remove_sensor(&self, sensor: &Sensor) {
        self.mutate(|s| s.remove_sensor(sensor));
    }

    fn update_sensor(&self, sensor: &Sensor) {
        self.mutate(|s| {
            if !s.replace_sensor(sensor) {
                debug!("Ignoring update for unknown sensor {}", sensor.name());
            }
        });
    }
}
