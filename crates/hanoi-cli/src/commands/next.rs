use anyhow::{Context as _, Result};
use hanoi_core::{Assignment, HanoiConfig};
use hanoi_state::SnapshotStore;
use tracing::debug;

use crate::context::Context;

pub fn run(ctx: &Context) -> Result<()> {
    let assignment = advance(&ctx.store, ctx.name(), &ctx.config)?;
    println!("{assignment}");
    Ok(())
}

/// Load (or bootstrap) the rotation, take one step, and persist it.
pub fn advance<S: SnapshotStore>(
    store: &S,
    name: &str,
    config: &HanoiConfig,
) -> Result<Assignment> {
    let mut scheduler = super::load_or_fresh(store, name, config)?;
    if let Ok(configured) = config.rotation() {
        if scheduler.config() != configured {
            debug!(
                stored_pools = scheduler.config().n_pools(),
                configured_pools = configured.n_pools(),
                "stored rotation shape differs from config, keeping stored"
            );
        }
    }
    let assignment = scheduler.next();
    store
        .save_scheduler(name, &scheduler)
        .with_context(|| format!("saving rotation state '{name}'"))?;
    debug!(%assignment, depth = scheduler.stack_depth(), "rotation advanced");
    Ok(assignment)
}
