//! Change detection between two SKU catalog snapshots.
//!
//! Additions only: a SKU or service plan that disappeared from the tenant is
//! never reported. That asymmetry is deliberate and load-bearing for the
//! downstream consumers of these reports.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use crate::api::{GraphClient, GraphError, GraphResult};

use super::snapshot::{self, SnapshotRow};

/// One detected catalog change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeRecord {
    /// A SKU that was not present in the previous snapshot.
    NewSku {
        sku_part_number: String,
        service_plans: Vec<String>,
    },
    /// A SKU present in both snapshots that gained service plans.
    NewServicePlans {
        sku_part_number: String,
        new_plans: Vec<String>,
    },
}

impl ChangeRecord {
    pub fn sku_part_number(&self) -> &str {
        match self {
            Self::NewSku {
                sku_part_number, ..
            }
            | Self::NewServicePlans {
                sku_part_number, ..
            } => sku_part_number,
        }
    }
}

/// Compares the current snapshot against the previous one and returns what is
/// new. Rows are matched by part number; plan-set equality is decided by the
/// sorted/joined plan strings.
pub fn diff_catalogs(current: &[SnapshotRow], previous: &[SnapshotRow]) -> Vec<ChangeRecord> {
    let previous_by_part: HashMap<&str, &SnapshotRow> = previous
        .iter()
        .map(|row| (row.sku_part_number.as_str(), row))
        .collect();

    let mut changes = Vec::new();

    for row in current {
        match previous_by_part.get(row.sku_part_number.as_str()) {
            None => changes.push(ChangeRecord::NewSku {
                sku_part_number: row.sku_part_number.clone(),
                service_plans: row.plan_names().iter().map(|s| s.to_string()).collect(),
            }),
            Some(prev) if prev.service_plans != row.service_plans => {
                let prev_plans: BTreeSet<&str> = prev.plan_names().into_iter().collect();
                let new_plans: Vec<String> = row
                    .plan_names()
                    .into_iter()
                    .filter(|plan| !prev_plans.contains(plan))
                    .map(|s| s.to_string())
                    .collect();

                // The strings can differ because plans were removed; only
                // additions produce a record
                if !new_plans.is_empty() {
                    changes.push(ChangeRecord::NewServicePlans {
                        sku_part_number: row.sku_part_number.clone(),
                        new_plans,
                    });
                }
            }
            Some(_) => {}
        }
    }

    changes
}

/// Fetches the current catalog, diffs it against the snapshot at `path` when
/// one exists, then unconditionally rewrites the snapshot. Returns the
/// detected changes (empty on a first run).
pub async fn diff_license_catalog(
    client: &GraphClient,
    path: &Path,
) -> GraphResult<Vec<ChangeRecord>> {
    let skus = client.list_subscribed_skus().await?;
    if skus.is_empty() {
        // A tenant always has at least one subscribed SKU; zero means the
        // fetch went wrong somewhere upstream
        return Err(GraphError::EmptyCatalog);
    }

    let current = snapshot::normalize_catalog(&skus);

    let changes = if path.exists() {
        let previous = snapshot::read_snapshot(path)?;
        diff_catalogs(&current, &previous)
    } else {
        log::info!("No prior snapshot at {}, creating one", path.display());
        Vec::new()
    };

    snapshot::write_snapshot(path, &current)?;

    Ok(changes)
}
