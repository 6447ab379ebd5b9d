//! CSV persistence for the SKU catalog snapshot.
//!
//! Three columns, in this order: `SkuPartNumber`, `ServicePlans` (plan names
//! sorted ascending, `;`-joined), `ServicePlanCount`. The file is read in
//! full when present and rewritten in full after every successful fetch.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::api::{GraphError, GraphResult, SubscribedSku};

pub const PLAN_SEPARATOR: &str = ";";

/// One normalized catalog row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRow {
    #[serde(rename = "SkuPartNumber")]
    pub sku_part_number: String,
    #[serde(rename = "ServicePlans")]
    pub service_plans: String,
    #[serde(rename = "ServicePlanCount")]
    pub service_plan_count: usize,
}

impl SnapshotRow {
    /// Splits the joined plan string back into individual plan names.
    pub fn plan_names(&self) -> Vec<&str> {
        if self.service_plans.is_empty() {
            Vec::new()
        } else {
            self.service_plans.split(PLAN_SEPARATOR).collect()
        }
    }
}

/// Normalizes the fetched catalog into snapshot rows: one row per SKU, plans
/// sorted and joined, rows sorted by part number. Permuting the input SKUs or
/// the plans within a SKU yields an identical result.
pub fn normalize_catalog(skus: &[SubscribedSku]) -> Vec<SnapshotRow> {
    let mut rows: Vec<SnapshotRow> = skus
        .iter()
        .map(|sku| {
            let mut names: Vec<&str> = sku
                .service_plans
                .iter()
                .map(|p| p.service_plan_name.as_str())
                .collect();
            names.sort_unstable();
            SnapshotRow {
                sku_part_number: sku.sku_part_number.clone(),
                service_plan_count: names.len(),
                service_plans: names.join(PLAN_SEPARATOR),
            }
        })
        .collect();
    rows.sort_by(|a, b| a.sku_part_number.cmp(&b.sku_part_number));
    rows
}

/// Reads a previously persisted snapshot. A malformed file is an error, not
/// something to recover from.
pub fn read_snapshot(path: &Path) -> GraphResult<Vec<SnapshotRow>> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| GraphError::SnapshotRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: SnapshotRow = record.map_err(|source| GraphError::SnapshotRead {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(row);
    }
    Ok(rows)
}

/// Writes the snapshot, replacing any existing file.
pub fn write_snapshot(path: &Path, rows: &[SnapshotRow]) -> GraphResult<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|source| GraphError::SnapshotWrite {
        path: path.to_path_buf(),
        source,
    })?;

    for row in rows {
        writer
            .serialize(row)
            .map_err(|source| GraphError::SnapshotWrite {
                path: path.to_path_buf(),
                source,
            })?;
    }

    writer
        .flush()
        .map_err(|source| GraphError::SnapshotWrite {
            path: path.to_path_buf(),
            source: source.into(),
        })?;

    log::info!("Wrote {} catalog rows to {}", rows.len(), path.display());
    Ok(())
}
