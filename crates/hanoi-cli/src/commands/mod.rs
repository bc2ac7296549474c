pub mod config;
pub mod init;
pub mod next;
pub mod preview;
pub mod show;
pub mod simulate;

use anyhow::{Context as _, Result};
use hanoi_core::{HanoiConfig, RotationScheduler};
use hanoi_state::SnapshotStore;
use tracing::info;

/// Restore the rotation stored under `name`, or start one from `config`.
///
/// The `[rotation]` table is only validated when nothing is stored; a stored
/// rotation carries its own shape.
pub(crate) fn load_or_fresh<S: SnapshotStore>(
    store: &S,
    name: &str,
    config: &HanoiConfig,
) -> Result<RotationScheduler> {
    let stored = store
        .load_scheduler(name)
        .with_context(|| format!("loading rotation state '{name}'"))?;
    Ok(match stored {
        Some(scheduler) => scheduler,
        None => {
            let fallback = config
                .rotation()
                .context("no stored rotation and the [rotation] config is invalid")?;
            info!(
                name,
                pools = fallback.n_pools(),
                tapes_per_pool = fallback.tapes_per_pool(),
                "no stored rotation, starting fresh"
            );
            RotationScheduler::new(fallback)
        }
    })
}
