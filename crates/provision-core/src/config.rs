//! provision.toml configuration parser.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Recipes run when no `run_list` is configured, in this order.
pub const DEFAULT_RUN_LIST: &[&str] = &[
    "ood_server_hostname",
    "slurm_license_monitor",
    "slurm_mariadb",
    "slurm_service_enable",
    "smbmount",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvisionConfig {
    pub host: HostConfig,
    pub run: RunConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Dnf,
    Apt,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub package_manager: PackageManager,
    /// Persistent mount table.
    pub fstab: PathBuf,
    /// Live mount table.
    pub mounts: PathBuf,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            package_manager: PackageManager::default(),
            fstab: PathBuf::from("/etc/fstab"),
            mounts: PathBuf::from("/proc/mounts"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub run_list: Vec<String>,
    /// Exit non-zero when any resource fails to converge.
    pub fail_on_error: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            run_list: DEFAULT_RUN_LIST.iter().map(|s| s.to_string()).collect(),
            fail_on_error: true,
        }
    }
}

impl ProvisionConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load `path` when given, otherwise fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
