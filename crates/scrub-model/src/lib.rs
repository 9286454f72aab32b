//! Data model for the record cleaner.
//!
//! - **role**: semantic roles a column can play and the kind of cleaning each needs
//! - **rules**: the canonical rule table mapping roles to alias lists
//! - **resolved**: the per-table mapping from role to concrete column label
//! - **options**: cleaning options (age bounds, reference year, derived fields)
//! - **summary**: per-table cleaning summary, stage tracking and issue counters
//! - **error**: table-level failure kinds

pub mod error;
pub mod options;
pub mod resolved;
pub mod role;
pub mod rules;
pub mod summary;

pub use error::{Result, ScrubError};
pub use options::{AgeBounds, CleaningOptions};
pub use resolved::{ResolvedRoles, UnresolvedReason, UnresolvedRole};
pub use role::{FieldKind, Role};
pub use rules::{RoleAliasSet, RuleTable};
pub use summary::{CleaningSummary, IssueKind, StageIssue, TableStage};

/// Sentinel written in place of a value that failed its format check.
pub const INVALID: &str = "Invalid";

/// Sentinel written in place of a value that was missing in the source.
pub const UNKNOWN: &str = "Unknown";

/// Sentinel written in the postcode validity column for a well-formed postcode.
pub const VALID: &str = "Valid";

/// Label of the postcode validity column added next to a resolved postcode.
pub const VALID_POSTCODE_COLUMN: &str = "Valid Postcode";

/// Label of the derived day-count column.
pub const DAYS_BETWEEN_COLUMN: &str = "days_between";
