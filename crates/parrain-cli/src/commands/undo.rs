use parrain_core::responses::UndoResponse;
use parrain_engine::undo_last;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `parrain undo`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let reverted = undo_last(&ctx.service).await?;
    output(
        &UndoResponse {
            message: "Last pairing undone.".to_string(),
            reverted,
        },
        flags.format,
    )
}
