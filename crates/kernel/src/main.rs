//! Sentiero command-line front end.
//!
//! Loads JSON menu definitions and prints trees and items as a renderer
//! would receive them.
//!
//! Usage:
//!   sentiero --file menus/main.json tree main
//!   sentiero --file menus/main.json item main.home

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use sentiero_kernel::{Config, cli};

/// Inspect menus built from dotted-name definitions.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Menu definition file, in addition to SENTIERO_MENU_FILES. Repeatable.
    #[arg(long = "file", short = 'f', global = true)]
    files: Vec<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the ordered tree below a root name.
    Tree {
        /// Root name, e.g. "main".
        root: String,

        /// Include hidden items, marked as such.
        #[arg(long)]
        all: bool,
    },
    /// Print a single item definition as JSON.
    Item {
        /// Full dotted name.
        name: String,
    },
    /// List every registered name.
    Names,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let args = Args::parse();
    let config = Config::from_env().context("failed to load configuration")?;
    info!(
        icon_base_class = %config.icon_base_class,
        files = config.menu_files.len() + args.files.len(),
        "Configuration loaded"
    );

    let menu = cli::load_menu(&config, &args.files)?;

    match args.command {
        Command::Tree { root, all } => cli::cmd_tree(&menu, &root, all),
        Command::Item { name } => cli::cmd_item(&menu, &name),
        Command::Names => cli::cmd_names(&menu),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
