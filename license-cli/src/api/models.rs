//! Microsoft Graph wire models for users, licenses and the SKU catalog.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

/// Response wrapper for paginated Graph collection responses.
#[derive(Debug, Deserialize)]
pub struct ODataCollection<T> {
    pub value: Vec<T>,
    #[serde(rename = "@odata.nextLink")]
    pub next_link: Option<String>,
}

/// OData error response body from Microsoft Graph.
#[derive(Debug, Deserialize)]
pub struct ODataError {
    pub error: ODataErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ODataErrorBody {
    pub code: String,
    pub message: String,
}

/// One license assignment on a user: a SKU plus the service plans that are
/// turned off for that user within it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuAssignment {
    pub sku_id: Uuid,
    #[serde(default)]
    pub disabled_plans: BTreeSet<Uuid>,
}

/// A user record with its current license assignments.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicensedUser {
    pub id: Uuid,
    pub user_principal_name: String,
    pub display_name: Option<String>,
    #[serde(default)]
    pub assigned_licenses: Vec<SkuAssignment>,
}

impl LicensedUser {
    /// Collapses the assignment list into a map keyed by SKU id, the shape
    /// the merge logic works on.
    pub fn assignment_map(&self) -> BTreeMap<Uuid, BTreeSet<Uuid>> {
        self.assigned_licenses
            .iter()
            .map(|a| (a.sku_id, a.disabled_plans.clone()))
            .collect()
    }
}

/// A service plan inside a subscribed SKU.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePlanInfo {
    pub service_plan_id: Uuid,
    pub service_plan_name: String,
}

/// One SKU the tenant has purchased, as returned by `GET /subscribedSkus`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribedSku {
    pub sku_id: Uuid,
    pub sku_part_number: String,
    #[serde(default)]
    pub service_plans: Vec<ServicePlanInfo>,
}

/// Request body for `POST /users/{id}/assignLicense`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignLicenseRequest {
    pub add_licenses: Vec<SkuAssignment>,
    pub remove_licenses: Vec<Uuid>,
}

impl AssignLicenseRequest {
    /// Builds an additive request from an assignment map. `removeLicenses`
    /// stays empty so SKUs absent from the map are left on the user.
    pub fn additive(assignments: BTreeMap<Uuid, BTreeSet<Uuid>>) -> Self {
        Self {
            add_licenses: assignments
                .into_iter()
                .map(|(sku_id, disabled_plans)| SkuAssignment {
                    sku_id,
                    disabled_plans,
                })
                .collect(),
            remove_licenses: Vec::new(),
        }
    }
}
