use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Import(args) => commands::import::handle(&args, &ctx, flags).await,
        Commands::Reset => commands::reset::handle(&ctx, flags).await,
        Commands::Draw(args) => commands::draw::handle(&args, &ctx, flags).await,
        Commands::Undo => commands::undo::handle(&ctx, flags).await,
        Commands::Stats => commands::stats::handle(&ctx, flags).await,
        Commands::Export(args) => commands::export::handle(&args, &ctx, flags).await,
        Commands::Serve(args) => commands::serve::handle(&args, ctx).await,
        Commands::Init(_) => unreachable!("init is pre-dispatched in main"),
    }
}
