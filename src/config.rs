use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::app_dirs::AppDirs;
use crate::error::ConfigError;
use crate::session::SessionConfig;

pub const MIN_BPM: u32 = 40;
pub const MAX_BPM: u32 = 240;
pub const MIN_DURATION_SECS: u64 = 5;
pub const MAX_DURATION_SECS: u64 = 600;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub bpm: u32,
    pub duration_secs: u64,
    /// ring the terminal bell on every beat
    pub click: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bpm: 120,
            duration_secs: 30,
            click: true,
        }
    }
}

impl Config {
    pub fn session_config(&self) -> Result<SessionConfig, ConfigError> {
        SessionConfig::new(self.bpm as f64, self.duration_secs)
    }

    /// Nudge the tempo, staying inside the range the UI offers.
    pub fn adjust_bpm(&mut self, delta: i32) {
        self.bpm = self
            .bpm
            .saturating_add_signed(delta)
            .clamp(MIN_BPM, MAX_BPM);
    }

    pub fn adjust_duration(&mut self, delta: i64) {
        self.duration_secs = self
            .duration_secs
            .saturating_add_signed(delta)
            .clamp(MIN_DURATION_SECS, MAX_DURATION_SECS);
    }
}

pub trait ConfigStore {
    fn try_load(&self) -> Result<Config, ConfigError>;
    fn save(&self, cfg: &Config) -> Result<(), ConfigError>;

    /// Stored config, or the defaults when it is missing or unusable.
    fn load(&self) -> Config {
        match self.try_load() {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!(error = %err, "using default config");
                Config::default()
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::config_path().unwrap_or_else(|| PathBuf::from("tapwise_config.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn try_load(&self) -> Result<Config, ConfigError> {
        let bytes = fs::read(&self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        let cfg = serde_json::from_slice::<Config>(&bytes)?;
        cfg.session_config()?;
        Ok(cfg)
    }

    fn save(&self, cfg: &Config) -> Result<(), ConfigError> {
        let io_err = |source: std::io::Error| ConfigError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data).map_err(io_err)
    }
}
