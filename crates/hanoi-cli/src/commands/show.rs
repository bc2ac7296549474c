use anyhow::{Context as _, Result};
use hanoi_core::RotationSnapshot;
use hanoi_state::SnapshotStore;

use crate::context::Context;

pub fn run(ctx: &Context, format: &str) -> Result<()> {
    let name = ctx.name();
    let Some(snapshot) = ctx
        .store
        .get_snapshot(name)
        .with_context(|| format!("loading rotation state '{name}'"))?
    else {
        println!("No rotation state stored under '{name}'.");
        return Ok(());
    };

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&snapshot)?),
        _ => println!("{}", format_snapshot(name, &snapshot)?),
    }
    Ok(())
}

/// Human-readable summary, including the assignment `next` would print.
pub fn format_snapshot(name: &str, snapshot: &RotationSnapshot) -> Result<String> {
    let scheduler = hanoi_core::RotationScheduler::restore(snapshot.clone())?;
    let upcoming = scheduler.peek(1)[0];
    let tapes = snapshot
        .tapes
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ");

    let mut out = String::new();
    out.push_str(&format!("Rotation:      {name}\n"));
    out.push_str(&format!(
        "Shape:         {} pools × {} tapes\n",
        snapshot.n_pools, snapshot.tapes_per_pool
    ));
    out.push_str(&format!("Stack depth:   {}\n", snapshot.stack.len()));
    out.push_str(&format!("Tape counters: {tapes}\n"));
    out.push_str(&format!("Next:          {upcoming}"));
    Ok(out)
}
