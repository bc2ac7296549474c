use anyhow::Result;

use crate::context::Context;

pub fn run(ctx: &Context, count: usize) -> Result<()> {
    let scheduler = super::load_or_fresh(&ctx.store, ctx.name(), &ctx.config)?;
    for (i, assignment) in scheduler.peek(count).into_iter().enumerate() {
        println!("{:>4}  {assignment}", i + 1);
    }
    Ok(())
}
