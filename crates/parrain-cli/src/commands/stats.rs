use parrain_engine::report;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `parrain stats`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let stats = report::stats(&ctx.service, &ctx.registry).await?;
    output(&stats, flags.format)
}
