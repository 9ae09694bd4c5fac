use parrain_core::responses::ResetResponse;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `parrain reset`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let report = ctx.service.reset_sponsorship().await?;
    output(
        &ResetResponse {
            message: "Sponsorship reset successfully.".to_string(),
            report,
        },
        flags.format,
    )
}
