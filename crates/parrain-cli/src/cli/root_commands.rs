use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Create the project directory and database, and seed the cohorts.
    Init(InitArgs),
    /// Replace every student with the rows of the import feed.
    Import(ImportArgs),
    /// Clear all pairings and every student's sponsorship state.
    Reset,
    /// Draw one mentee and assign them a mentor.
    Draw(DrawArgs),
    /// Undo the most recent pairing.
    Undo,
    /// Show remaining mentees and the size of the mentor pool.
    Stats,
    /// Export all pairings as CSV.
    Export(ExportArgs),
    /// Serve the HTTP API.
    Serve(ServeArgs),
}

impl Commands {
    /// Subcommand name as typed on the command line.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Init(_) => "init",
            Self::Import(_) => "import",
            Self::Reset => "reset",
            Self::Draw(_) => "draw",
            Self::Undo => "undo",
            Self::Stats => "stats",
            Self::Export(_) => "export",
            Self::Serve(_) => "serve",
        }
    }
}

#[derive(Clone, Debug, Args)]
pub struct InitArgs {
    /// Delete an existing database before initializing.
    #[arg(long)]
    pub force: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ImportArgs {
    /// Feed file (defaults to `import.csv_path` from config).
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct DrawArgs {
    /// Seed for a reproducible draw (overrides `draw.seed`).
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Clone, Debug, Args)]
pub struct ExportArgs {
    /// Write to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Listen address (overrides `server.bind`).
    #[arg(long)]
    pub bind: Option<String>,
}
