use anyhow::{Context as _, Result, bail};
use hanoi_core::{RotationConfig, RotationScheduler};
use hanoi_state::SnapshotStore;
use tracing::warn;

use crate::context::Context;

pub fn run(ctx: &Context, pools: Option<usize>, tapes: Option<usize>, force: bool) -> Result<()> {
    let configured = &ctx.config.rotation;
    let config = RotationConfig::new(
        pools.unwrap_or(configured.pools),
        tapes.unwrap_or(configured.tapes_per_pool),
    )?;
    initialize(&ctx.store, ctx.name(), config, force)?;
    println!(
        "✓ Initialized rotation '{}': {} pools × {} tapes ({} tapes total)",
        ctx.name(),
        config.n_pools(),
        config.tapes_per_pool(),
        config.total_tapes()
    );
    Ok(())
}

/// Store a fresh rotation under `name`.
///
/// Refuses to replace an existing rotation unless `force` is set. With
/// `force`, even an unreadable snapshot is replaced.
pub fn initialize<S: SnapshotStore>(
    store: &S,
    name: &str,
    config: RotationConfig,
    force: bool,
) -> Result<RotationScheduler> {
    if force {
        if store.delete_snapshot(name)? {
            warn!(name, "discarding existing rotation state");
        }
    } else if store
        .get_snapshot(name)
        .with_context(|| format!("checking for rotation state '{name}'"))?
        .is_some()
    {
        bail!("rotation state '{name}' already exists (use --force to overwrite)");
    }

    let scheduler = RotationScheduler::new(config);
    store
        .save_scheduler(name, &scheduler)
        .with_context(|| format!("saving rotation state '{name}'"))?;
    Ok(scheduler)
}
