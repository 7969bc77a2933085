use std::io;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod subcommands;

/// Render `DocC` pages to Markdown and search the page catalog
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a `DocC` JSON page to Markdown
    Render(subcommands::render::Args),

    /// Search page titles and abstracts in a Markdown catalog
    Search(subcommands::search::Args),
}

/// Log to stderr, filtered by `DOCC_LOG` (defaults to warnings only).
fn setup_logging() {
    use tracing_subscriber::{EnvFilter, prelude::*};

    let filter = EnvFilter::try_from_env("DOCC_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(io::IsTerminal::is_terminal(&io::stderr()))
        .with_filter(filter);

    tracing_subscriber::registry().with(layer).init();
}

fn main() -> Result<()> {
    setup_logging();

    match Cli::parse().command {
        Commands::Render(args) => subcommands::render::run(&args),
        Commands::Search(args) => subcommands::search::run(&args),
    }
}
