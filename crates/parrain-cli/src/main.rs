#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]
#![allow(clippy::unused_async)]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

mod cli;
mod commands;
mod context;
mod output;
mod progress;
mod server;
mod ui;
mod write_lock;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("parrain error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    if let cli::Commands::Init(args) = &cli.command {
        return commands::init::handle(args, &flags).await;
    }

    let project_root = resolve_project_root(flags.project.as_deref())?;
    let config = context::load_config(&project_root)?;

    let command = cli.command;
    let write_lock = if command_requires_write_lock(&command) {
        Some(write_lock::acquire_for_project(&project_root, command.name()).await?)
    } else {
        None
    };

    let ctx = context::AppContext::init(project_root, config)
        .await
        .context("failed to initialize parrain application context")?;

    let result = commands::dispatch::dispatch(command, ctx, &flags).await;
    drop(write_lock);
    result
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("PARRAIN_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn resolve_project_root(project_override: Option<&str>) -> anyhow::Result<PathBuf> {
    if let Some(path) = project_override {
        return context::explicit_project_root(path);
    }

    let start = std::env::current_dir().context("failed to read current directory")?;
    context::find_project_root(&start)
        .context("not a parrain project (no .parrain directory found). Run 'parrain init' first.")
}

fn command_requires_write_lock(command: &cli::Commands) -> bool {
    match command {
        cli::Commands::Import(_)
        | cli::Commands::Reset
        | cli::Commands::Draw(_)
        | cli::Commands::Undo
        | cli::Commands::Serve(_) => true,
        cli::Commands::Stats | cli::Commands::Export(_) | cli::Commands::Init(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{cli, command_requires_write_lock};

    fn parse(args: &[&str]) -> cli::Commands {
        cli::Cli::try_parse_from(args).unwrap().command
    }

    #[test]
    fn mutating_commands_take_the_write_lock() {
        for args in [
            ["parrain", "import"].as_slice(),
            &["parrain", "reset"],
            &["parrain", "draw"],
            &["parrain", "undo"],
            &["parrain", "serve"],
        ] {
            assert!(command_requires_write_lock(&parse(args)), "{args:?}");
        }
    }

    #[test]
    fn read_only_commands_do_not() {
        for args in [
            ["parrain", "stats"].as_slice(),
            &["parrain", "export"],
            &["parrain", "init"],
        ] {
            assert!(!command_requires_write_lock(&parse(args)), "{args:?}");
        }
    }
}
