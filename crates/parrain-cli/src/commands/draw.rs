use parrain_core::responses::DrawResponse;
use parrain_engine::PairingEngine;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::DrawArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `parrain draw`.
pub async fn handle(args: &DrawArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let seed = args.seed.or(ctx.config.draw.seed);
    let mut engine = PairingEngine::from_seed(ctx.registry.clone(), seed);
    let detail = engine.draw(&ctx.service).await?;
    output(&DrawResponse::from(&detail), flags.format)
}
