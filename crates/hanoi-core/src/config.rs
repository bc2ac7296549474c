//! hanoi.toml configuration parser.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RotationError, RotationResult};

/// Pool count used when no state and no config exist.
pub const DEFAULT_POOLS: usize = 15;

/// Tapes per pool used when no state and no config exist.
pub const DEFAULT_TAPES_PER_POOL: usize = 2;

/// Snapshot key used when none is configured.
pub const DEFAULT_STATE_NAME: &str = "default";

/// Validated rotation shape. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationConfig {
    n_pools: usize,
    tapes_per_pool: usize,
}

impl RotationConfig {
    pub fn new(n_pools: usize, tapes_per_pool: usize) -> RotationResult<Self> {
        if n_pools == 0 {
            return Err(RotationError::InvalidConfig(
                "n_pools must be at least 1".to_string(),
            ));
        }
        if tapes_per_pool == 0 {
            return Err(RotationError::InvalidConfig(
                "tapes_per_pool must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            n_pools,
            tapes_per_pool,
        })
    }

    pub fn n_pools(&self) -> usize {
        self.n_pools
    }

    pub fn tapes_per_pool(&self) -> usize {
        self.tapes_per_pool
    }

    /// Total number of distinct `(pool, tape)` slots.
    pub fn total_tapes(&self) -> usize {
        self.n_pools * self.tapes_per_pool
    }
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            n_pools: DEFAULT_POOLS,
            tapes_per_pool: DEFAULT_TAPES_PER_POOL,
        }
    }
}

/// Top-level `hanoi.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HanoiConfig {
    pub rotation: RotationSection,
    pub state: StateSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationSection {
    pub pools: usize,
    pub tapes_per_pool: usize,
}

impl Default for RotationSection {
    fn default() -> Self {
        Self {
            pools: DEFAULT_POOLS,
            tapes_per_pool: DEFAULT_TAPES_PER_POOL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateSection {
    pub backend: StateBackend,
    /// redb database file, or snapshot directory for the json backend.
    pub path: Option<PathBuf>,
    /// Key the snapshot is stored under.
    pub name: String,
}

impl Default for StateSection {
    fn default() -> Self {
        Self {
            backend: StateBackend::default(),
            path: None,
            name: DEFAULT_STATE_NAME.to_string(),
        }
    }
}

impl StateSection {
    /// Configured path, or the backend's default location.
    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| self.backend.default_path())
    }
}

/// Where snapshots are persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateBackend {
    /// Single redb database file.
    #[default]
    Redb,
    /// One JSON file per snapshot name in a directory.
    Json,
}

impl StateBackend {
    pub fn default_path(&self) -> PathBuf {
        match self {
            StateBackend::Redb => PathBuf::from("hanoi.redb"),
            StateBackend::Json => PathBuf::from("hanoi-state"),
        }
    }
}

impl FromStr for StateBackend {
    type Err = RotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "redb" => Ok(StateBackend::Redb),
            "json" => Ok(StateBackend::Json),
            other => Err(RotationError::InvalidConfig(format!(
                "unknown state backend '{other}' (expected redb or json)"
            ))),
        }
    }
}

impl fmt::Display for StateBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateBackend::Redb => f.write_str("redb"),
            StateBackend::Json => f.write_str("json"),
        }
    }
}

impl HanoiConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: HanoiConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validated rotation shape from the `[rotation]` table.
    pub fn rotation(&self) -> RotationResult<RotationConfig> {
        RotationConfig::new(self.rotation.pools, self.rotation.tapes_per_pool)
    }
}
