//! `catalog` commands: diff against the persisted snapshot, or just show the
//! current catalog.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::*;

use crate::api::GraphError;
use crate::config::Config;
use crate::services::{ChangeRecord, diff_license_catalog, normalize_catalog};

#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// Compare the current catalog against the saved snapshot and rewrite it
    Diff(DiffArgs),

    /// Print the current catalog without touching the snapshot
    Show,
}

#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Snapshot file to compare against and rewrite
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
}

pub async fn handle_catalog_command(command: CatalogCommands, config: &Config) -> Result<()> {
    match command {
        CatalogCommands::Diff(args) => handle_diff(args, config).await,
        CatalogCommands::Show => handle_show(config).await,
    }
}

async fn handle_diff(args: DiffArgs, config: &Config) -> Result<()> {
    let client = super::build_client(config)?;
    let snapshot_path = args.snapshot.unwrap_or_else(|| config.snapshot_path.clone());

    let changes = diff_license_catalog(&client, &snapshot_path).await?;

    if changes.is_empty() {
        println!("{}", "No catalog changes since the last snapshot".dimmed());
    } else {
        for change in &changes {
            match change {
                ChangeRecord::NewSku {
                    sku_part_number,
                    service_plans,
                } => println!(
                    "{} {} ({} plans: {})",
                    "new sku".bright_green().bold(),
                    sku_part_number,
                    service_plans.len(),
                    service_plans.join(", ")
                ),
                ChangeRecord::NewServicePlans {
                    sku_part_number,
                    new_plans,
                } => println!(
                    "{} {} gained {}",
                    "new plans".bright_yellow().bold(),
                    sku_part_number,
                    new_plans.join(", ")
                ),
            }
        }
    }

    println!(
        "Snapshot written to {}",
        snapshot_path.display().to_string().cyan()
    );

    Ok(())
}

async fn handle_show(config: &Config) -> Result<()> {
    let client = super::build_client(config)?;

    let skus = client.list_subscribed_skus().await?;
    if skus.is_empty() {
        return Err(GraphError::EmptyCatalog.into());
    }

    for row in normalize_catalog(&skus) {
        println!(
            "{} ({} plans)",
            row.sku_part_number.bold(),
            row.service_plan_count
        );
        for plan in row.plan_names() {
            println!("  {plan}");
        }
    }

    Ok(())
}
