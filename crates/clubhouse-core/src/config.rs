use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CoreConfig {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub club: ClubConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
    #[default]
    Memory,
    File,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackendKind,
    pub root_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClubConfig {
    pub home_location: String,
    pub default_activity: String,
    pub upcoming_limit: usize,
    pub partner_preview_limit: usize,
}

impl Default for ClubConfig {
    fn default() -> Self {
        Self {
            home_location: "Main Club".to_string(),
            default_activity: "training".to_string(),
            upcoming_limit: 3,
            partner_preview_limit: 2,
        }
    }
}

impl CoreConfig {
    /// Reads a JSON config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file absent, using defaults");
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)?;
        let cfg: CoreConfig = serde_json::from_str(&data)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.storage.backend == StorageBackendKind::File && self.storage.root_dir.is_none() {
            return Err(CoreError::Config(
                "storage.root_dir is required for the file backend".to_string(),
            ));
        }
        if self.club.upcoming_limit == 0 {
            return Err(CoreError::Config("club.upcoming_limit must be > 0".to_string()));
        }
        if self.club.partner_preview_limit == 0 {
            return Err(CoreError::Config(
                "club.partner_preview_limit must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
