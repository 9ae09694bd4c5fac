use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use parrain_engine::export;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ExportArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ExportSummary {
    path: PathBuf,
    rows: usize,
}

/// Handle `parrain export`.
///
/// Without `--output` the CSV goes to stdout as-is, whatever `--format` says.
pub async fn handle(
    args: &ExportArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let delimiter = ctx
        .config
        .export
        .delimiter_byte()
        .context("invalid [export] configuration")?;

    match &args.output {
        Some(path) => {
            let rows = export::write_file(&ctx.service, path, delimiter).await?;
            output(
                &ExportSummary {
                    path: path.clone(),
                    rows,
                },
                flags.format,
            )
        }
        None => {
            let rows = export::export_rows(&ctx.service).await?;
            let bytes = export::to_csv(&rows, delimiter).await?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes).context("failed to write CSV to stdout")?;
            stdout.flush()?;
            Ok(())
        }
    }
}
