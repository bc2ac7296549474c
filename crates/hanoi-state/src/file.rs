//! FileStore — one JSON file per snapshot.
//!
//! `{dir}/{name}.json` holds a pretty-printed [`RotationSnapshot`]. Writes
//! go to a sibling `.tmp` file, which is synced and then renamed over the
//! target, so a reader never observes a half-written snapshot. On unix the
//! directory is synced too, making the rename itself durable.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use hanoi_core::RotationSnapshot;
use tracing::debug;

use crate::backend::SnapshotStore;
use crate::error::{StateError, StateResult, map_err};

/// Directory of JSON snapshot files.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (or create) a snapshot directory.
    pub fn open(dir: &Path) -> StateResult<Self> {
        fs::create_dir_all(dir).map_err(map_err!(Open))?;
        debug!(?dir, "file store opened");
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing snapshot `name`.
    pub fn path_for(&self, name: &str) -> StateResult<PathBuf> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !name.starts_with('.');
        if !valid {
            return Err(StateError::InvalidName(name.to_string()));
        }
        Ok(self.dir.join(format!("{name}.json")))
    }

    #[cfg(unix)]
    fn sync_dir(&self) -> StateResult<()> {
        File::open(&self.dir)
            .and_then(|dir| dir.sync_all())
            .map_err(map_err!(Io))
    }

    // Directories cannot be opened as files here; the rename is still atomic.
    #[cfg(not(unix))]
    fn sync_dir(&self) -> StateResult<()> {
        Ok(())
    }
}

impl SnapshotStore for FileStore {
    fn get_snapshot(&self, name: &str) -> StateResult<Option<RotationSnapshot>> {
        let path = self.path_for(name)?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StateError::Read(format!("{}: {e}", path.display()))),
        };
        let snapshot = RotationSnapshot::from_json(&bytes)
            .map_err(|e| StateError::Deserialize(format!("{}: {e}", path.display())))?;
        Ok(Some(snapshot))
    }

    fn put_snapshot(&self, name: &str, snapshot: &RotationSnapshot) -> StateResult<()> {
        let path = self.path_for(name)?;
        let tmp = path.with_extension("json.tmp");
        let value = serde_json::to_vec_pretty(snapshot).map_err(map_err!(Serialize))?;
        {
            let mut file = File::create(&tmp).map_err(map_err!(Io))?;
            file.write_all(&value).map_err(map_err!(Io))?;
            file.sync_all().map_err(map_err!(Io))?;
        }
        fs::rename(&tmp, &path).map_err(map_err!(Io))?;
        self.sync_dir()?;
        debug!(path = %path.display(), depth = snapshot.stack.len(), "snapshot stored");
        Ok(())
    }

    fn delete_snapshot(&self, name: &str) -> StateResult<bool> {
        let path = self.path_for(name)?;
        let existed = match fs::remove_file(&path) {
            Ok(()) => true,
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => return Err(StateError::Io(e.to_string())),
        };
        debug!(path = %path.display(), existed, "snapshot deleted");
        Ok(existed)
    }
}
