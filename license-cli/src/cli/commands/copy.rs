//! `copy` command: copy a user's license assignment to other users.

use anyhow::Result;
use clap::Args;
use colored::*;

use crate::config::Config;
use crate::services::copy_user_licenses;

#[derive(Args, Debug)]
pub struct CopyArgs {
    /// User to copy the license assignment from (object id or UPN)
    #[arg(short, long)]
    pub source: String,

    /// Users to apply the assignment to, processed in order
    #[arg(required = true)]
    pub targets: Vec<String>,
}

pub async fn handle_copy_command(args: CopyArgs, config: &Config) -> Result<()> {
    let client = super::build_client(config)?;

    let outcomes = copy_user_licenses(&client, &args.source, &args.targets).await?;

    let mut failures = 0usize;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(summary) => println!(
                "{} {} ({} added, {} overwritten, {} kept)",
                "ok".bright_green().bold(),
                outcome.target,
                summary.skus_added,
                summary.skus_overwritten,
                summary.skus_kept
            ),
            Err(e) => {
                failures += 1;
                println!("{} {}: {}", "failed".bright_red().bold(), outcome.target, e);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} target(s) failed", outcomes.len());
    }

    Ok(())
}
