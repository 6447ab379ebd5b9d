//! Business logic, decoupled from the CLI and reusable across contexts.

pub mod catalog_diff;
pub mod license_copy;
pub mod snapshot;

pub use catalog_diff::{ChangeRecord, diff_catalogs, diff_license_catalog};
pub use license_copy::{AssignmentMap, CopyOutcome, CopySummary, copy_user_licenses, merge_assignments};
pub use snapshot::{SnapshotRow, normalize_catalog};
