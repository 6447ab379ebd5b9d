//! Command-line interface definitions.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{catalog::CatalogCommands, copy::CopyArgs};

#[derive(Parser)]
#[command(
    name = "license-cli",
    about = "Microsoft 365 license administration from the command line",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to an alternate config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Copy one user's license assignment to one or more other users
    Copy(CopyArgs),

    /// Inspect the tenant's subscribed-SKU catalog
    #[command(subcommand)]
    Catalog(CatalogCommands),
}
