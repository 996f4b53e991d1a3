use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Values read from a `.env` file, consulted after the process environment.
///
/// The process environment is never modified; real env vars take precedence.
#[derive(Debug, Default, Clone)]
pub struct DotEnv {
    vars: HashMap<String, String>,
}

impl DotEnv {
    /// Read `path`. A missing or unreadable file yields no values.
    pub fn from_file(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(_) => Self::default(),
        }
    }

    fn parse(content: &str) -> Self {
        let vars = parse_dotenv(content)
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self { vars }
    }

    /// Look `key` up in the environment first, then in the file.
    pub fn var(&self, key: &str) -> Option<String> {
        std::env::var(key)
            .ok()
            .or_else(|| self.vars.get(key).cloned())
    }
}

/// Load the `.env` file in the working directory with robust parsing.
/// Handles values with spaces without requiring quotes.
pub fn load_dotenv() -> DotEnv {
    DotEnv::from_file(Path::new(".env"))
}

/// Parse `KEY=value` lines, skipping blanks and comments.
fn parse_dotenv(content: &str) -> Vec<(&str, &str)> {
    let mut pairs = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let mut value = value.trim();

            if value.len() >= 2
                && ((value.starts_with('"') && value.ends_with('"'))
                    || (value.starts_with('\'') && value.ends_with('\'')))
            {
                value = &value[1..value.len() - 1];
            }
            pairs.push((key, value));
        }
    }
    pairs
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub storage: StorageConfig,
    pub camera: CameraConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding sensors and statuses.
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Chance the fake classifier reports a cat, `0.0..=1.0`.
    pub cat_probability: f64,
    /// Seconds between frames in monitor mode.
    pub monitor_interval_secs: u64,
}

impl StorageConfig {
    fn default_path() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join("catpoint").join("security.json"))
            .unwrap_or_else(|| PathBuf::from("catpoint-security.json"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                path: StorageConfig::default_path(),
            },
            camera: CameraConfig {
                cat_probability: 0.5,
                monitor_interval_secs: 5,
            },
        }
    }
}

impl Config {
    /// Defaults overlaid with the environment and the `.env` file.
    pub fn from_env() -> Self {
        Self::from_dotenv(&load_dotenv())
    }

    pub fn from_dotenv(dotenv: &DotEnv) -> Self {
        Self::from_lookup(|key| dotenv.var(key))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup("CATPOINT_DATA_PATH") {
            config.storage.path = PathBuf::from(path);
        }
        if let Some(probability) = lookup("CATPOINT_CAT_PROBABILITY")
            && let Ok(p) = probability.parse::<f64>()
            && (0.0..=1.0).contains(&p)
        {
            config.camera.cat_probability = p;
        }
        if let Some(interval) = lookup("CATPOINT_MONITOR_INTERVAL")
            && let Ok(secs) = interval.parse::<u64>()
            && secs > 0
        {
            config.camera.monitor_interval_secs = secs;
        }

        config
    }
}
