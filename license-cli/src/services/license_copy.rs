//! Copying one user's license assignment to other users.
//!
//! The merge itself is a pure function over assignment maps; the
//! orchestration wraps it with Graph calls and per-target error isolation.

use std::collections::{BTreeMap, BTreeSet};

use uuid::Uuid;

use crate::api::{AssignLicenseRequest, GraphClient, GraphError, GraphResult};

/// Assignment state of one user: SKU id to the set of disabled plan ids.
pub type AssignmentMap = BTreeMap<Uuid, BTreeSet<Uuid>>;

/// Result of processing one copy target.
#[derive(Debug)]
pub struct CopyOutcome {
    pub target: String,
    pub result: GraphResult<CopySummary>,
}

/// What the copy changed on a successfully processed target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopySummary {
    /// SKUs the target did not have before.
    pub skus_added: usize,
    /// SKUs the target already had whose disabled-plan set was overwritten.
    pub skus_overwritten: usize,
    /// Target-only SKUs left untouched.
    pub skus_kept: usize,
}

/// Merges a source assignment map onto a target's.
///
/// Every SKU the source has ends up in the result with the source's
/// disabled-plan configuration, overwriting the target's configuration for
/// that SKU if present. SKUs only the target has are carried over unchanged.
/// Nothing is ever removed.
pub fn merge_assignments(source: &AssignmentMap, target: &AssignmentMap) -> AssignmentMap {
    let mut merged = target.clone();
    for (sku_id, disabled_plans) in source {
        merged.insert(*sku_id, disabled_plans.clone());
    }
    merged
}

fn summarize(source: &AssignmentMap, target: &AssignmentMap) -> CopySummary {
    let skus_overwritten = source.keys().filter(|k| target.contains_key(k)).count();
    CopySummary {
        skus_added: source.len() - skus_overwritten,
        skus_overwritten,
        skus_kept: target.keys().filter(|k| !source.contains_key(k)).count(),
    }
}

/// Copies the source user's license assignment onto every target, strictly in
/// input order. A failure on one target is recorded in its outcome and does
/// not stop the remaining targets; failing to fetch the source is fatal, and
/// so is losing authentication mid-run, since every later target would fail
/// the same way.
pub async fn copy_user_licenses(
    client: &GraphClient,
    source: &str,
    targets: &[String],
) -> GraphResult<Vec<CopyOutcome>> {
    let source_user = client.get_user(source).await?;
    let source_map = source_user.assignment_map();

    log::info!(
        "Copying {} SKU assignment(s) from {} to {} target(s)",
        source_map.len(),
        source_user.user_principal_name,
        targets.len()
    );

    let mut outcomes = Vec::with_capacity(targets.len());

    for target in targets {
        let result = copy_to_target(client, &source_map, target).await;
        match result {
            Err(e @ GraphError::Auth(_)) => return Err(e),
            result => {
                if let Err(ref e) = result {
                    log::error!("Failed to copy licenses to {target}: {e}");
                }
                outcomes.push(CopyOutcome {
                    target: target.clone(),
                    result,
                });
            }
        }
    }

    Ok(outcomes)
}

async fn copy_to_target(
    client: &GraphClient,
    source_map: &AssignmentMap,
    target: &str,
) -> GraphResult<CopySummary> {
    let target_user = client.get_user(target).await?;
    let target_map = target_user.assignment_map();

    let summary = summarize(source_map, &target_map);

    // Apply the full merged set; removeLicenses stays empty so nothing is
    // ever taken away from the target
    let merged = merge_assignments(source_map, &target_map);
    let request = AssignLicenseRequest::additive(merged);
    client.assign_license(target, &request).await?;

    log::info!(
        "Updated {}: {} added, {} overwritten, {} kept",
        target_user.user_principal_name,
        summary.skus_added,
        summary.skus_overwritten,
        summary.skus_kept
    );

    Ok(summary)
}
