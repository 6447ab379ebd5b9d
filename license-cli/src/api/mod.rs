//! Microsoft Graph API layer for license administration.
//!
//! Covers the three Graph surfaces the tool needs: OAuth2 client-credentials
//! authentication, the tenant's subscribed-SKU catalog, and per-user license
//! assignment reads and writes.

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod resilience;

pub use auth::TokenCache;
pub use client::{DEFAULT_GRAPH_URL, GraphClient};
pub use error::{GraphError, GraphResult};
pub use models::{
    AssignLicenseRequest, LicensedUser, ServicePlanInfo, SkuAssignment, SubscribedSku,
};
pub use resilience::RetryConfig;
