use anyhow::Result;
use clap::Parser;

use license_cli::cli::commands::{catalog, copy};
use license_cli::cli::{Cli, Commands};
use license_cli::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Copy(args) => copy::handle_copy_command(args, &config).await,
        Commands::Catalog(command) => catalog::handle_catalog_command(command, &config).await,
    }
}
