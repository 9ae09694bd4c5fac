use anyhow::Context;
use parrain_core::responses::ImportResponse;
use parrain_engine::feed;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ImportArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Handle `parrain import`.
pub async fn handle(
    args: &ImportArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let path = args
        .file
        .clone()
        .unwrap_or_else(|| ctx.resolve(&ctx.config.import.csv_path));
    let delimiter = ctx
        .config
        .import
        .delimiter_byte()
        .context("invalid [import] configuration")?;

    let progress = Progress::spinner(&format!("Importing {}", path.display()));
    let report = match feed::import(&ctx.service, &path, delimiter).await {
        Ok(report) => {
            progress.finish_clear();
            report
        }
        Err(error) => {
            progress.finish_err("import failed");
            return Err(error).with_context(|| format!("failed to import {}", path.display()));
        }
    };

    output(&ImportResponse::success(report), flags.format)
}
