//! Resolves configuration and opens the configured snapshot store.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use hanoi_core::config::StateBackend;
use hanoi_core::{HanoiConfig, RotationSnapshot};
use hanoi_state::{FileStore, SnapshotStore, StateResult, StateStore};
use tracing::debug;

use crate::GlobalArgs;

/// Config file picked up from the working directory when `--config` is absent.
const DEFAULT_CONFIG_FILE: &str = "hanoi.toml";

/// The configured backend.
pub enum Store {
    Redb(StateStore),
    Json(FileStore),
}

impl Store {
    pub fn open(backend: StateBackend, path: &Path) -> Result<Self> {
        let store = match backend {
            StateBackend::Redb => Store::Redb(
                StateStore::open(path)
                    .with_context(|| format!("opening state database {}", path.display()))?,
            ),
            StateBackend::Json => Store::Json(
                FileStore::open(path)
                    .with_context(|| format!("opening state directory {}", path.display()))?,
            ),
        };
        Ok(store)
    }
}

impl SnapshotStore for Store {
    fn get_snapshot(&self, name: &str) -> StateResult<Option<RotationSnapshot>> {
        match self {
            Store::Redb(s) => s.get_snapshot(name),
            Store::Json(s) => s.get_snapshot(name),
        }
    }

    fn put_snapshot(&self, name: &str, snapshot: &RotationSnapshot) -> StateResult<()> {
        match self {
            Store::Redb(s) => s.put_snapshot(name, snapshot),
            Store::Json(s) => s.put_snapshot(name, snapshot),
        }
    }

    fn delete_snapshot(&self, name: &str) -> StateResult<bool> {
        match self {
            Store::Redb(s) => s.delete_snapshot(name),
            Store::Json(s) => s.delete_snapshot(name),
        }
    }
}

/// Everything a command needs: effective config plus an open store.
pub struct Context {
    pub config: HanoiConfig,
    pub store: Store,
}

impl Context {
    pub fn open(config: HanoiConfig) -> Result<Self> {
        let path = config.state.resolved_path();
        debug!(backend = %config.state.backend, path = %path.display(), "opening state");
        let store = Store::open(config.state.backend, &path)?;
        Ok(Self { config, store })
    }

    /// Snapshot key.
    pub fn name(&self) -> &str {
        &self.config.state.name
    }
}

/// Load hanoi.toml (explicit, or from the working directory) and apply flag overrides.
pub fn effective_config(args: &GlobalArgs) -> Result<HanoiConfig> {
    let mut config = match &args.config {
        Some(path) => HanoiConfig::from_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
            HanoiConfig::from_file(Path::new(DEFAULT_CONFIG_FILE))
                .with_context(|| format!("reading config {DEFAULT_CONFIG_FILE}"))?
        }
        None => HanoiConfig::default(),
    };

    if let Some(backend) = args.backend {
        // Switching backend without a path should not reuse the other backend's path.
        if args.state.is_none() && backend != config.state.backend {
            config.state.path = None;
        }
        config.state.backend = backend;
    }
    if let Some(state) = &args.state {
        config.state.path = Some(PathBuf::from(state));
    }
    if let Some(name) = &args.name {
        config.state.name = name.clone();
    }
    Ok(config)
}
