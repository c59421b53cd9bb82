//! tilestack - view, render, and configure a column of image tiles.

mod commands;
mod error;
mod logging;

use clap::{Parser, Subcommand};

use crate::commands::config::ConfigCommands;
use crate::commands::render::RenderArgs;
use crate::commands::view::ViewArgs;
use crate::error::CliError;

/// Tile one remote image into a scrollable column.
#[derive(Debug, Parser)]
#[command(name = "tilestack", version = tilestack::VERSION)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Open the scrollable tile column in a window
    View(ViewArgs),

    /// Compose the tile column into a PNG
    Render(RenderArgs),

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result: Result<(), CliError> = match cli.command {
        Commands::View(args) => commands::view::run(args),
        Commands::Render(args) => commands::render::run(args),
        Commands::Config { command } => commands::config::run(command),
    };

    if let Err(error) = result {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}
