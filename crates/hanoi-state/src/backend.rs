//! The persistence seam between a rotation and its storage medium.

use hanoi_core::{RotationScheduler, RotationSnapshot};

use crate::error::StateResult;

/// Named, durable storage for rotation snapshots.
pub trait SnapshotStore {
    /// Read the snapshot stored under `name`, if any.
    ///
    /// Structural decode only; use [`SnapshotStore::load_scheduler`] for a
    /// validated scheduler.
    fn get_snapshot(&self, name: &str) -> StateResult<Option<RotationSnapshot>>;

    /// Insert or replace the snapshot stored under `name`.
    fn put_snapshot(&self, name: &str, snapshot: &RotationSnapshot) -> StateResult<()>;

    /// Remove the snapshot stored under `name`. Returns true if it existed.
    fn delete_snapshot(&self, name: &str) -> StateResult<bool>;

    /// Restore the scheduler stored under `name`.
    ///
    /// `Ok(None)` means nothing is stored and the caller should start a
    /// fresh rotation.
    fn load_scheduler(&self, name: &str) -> StateResult<Option<RotationScheduler>> {
        match self.get_snapshot(name)? {
            Some(snapshot) => Ok(Some(RotationScheduler::restore(snapshot)?)),
            None => Ok(None),
        }
    }

    /// Persist the scheduler's current state under `name`.
    fn save_scheduler(&self, name: &str, scheduler: &RotationScheduler) -> StateResult<()> {
        self.put_snapshot(name, &scheduler.snapshot())
    }
}
