//! Per-table cleaning pipeline.
//!
//! Sequences the stages over one loaded table:
//!
//! 1. Role resolution against the rule table
//! 2. Field validators and the date normalizer, per resolved role
//! 3. Age range check on the birth date
//! 4. `days_between` (when enabled)
//! 5. Duplicate removal
//! 6. Missing-value reconciliation
//!
//! Stage progress and issue counts are written to the caller's
//! [`CleaningSummary`]. An `Err` leaves the summary at the last stage
//! reached so the caller can record where the table failed.

use polars::prelude::DataFrame;
use scrub_model::{
    CleaningOptions, CleaningSummary, DAYS_BETWEEN_COLUMN, IssueKind, ResolvedRoles, Role,
    RuleTable, TableStage, UnresolvedReason,
};
use tracing::debug;

use crate::datetime::{apply_age_bounds, normalize_date_column};
use crate::dedupe::drop_duplicate_rows;
use crate::derived::add_days_between;
use crate::error::Result;
use crate::reconcile::fill_missing;
use crate::resolver::resolve;
use crate::validators::apply_field_rule;

/// Clean one loaded table.
///
/// The summary is expected at [`TableStage::Loaded`]; on success it is left
/// at [`TableStage::Reconciled`] and the caller advances it to `Done` once
/// the output is written.
pub fn clean_table(
    mut df: DataFrame,
    rules: &RuleTable,
    options: &CleaningOptions,
    summary: &mut CleaningSummary,
) -> Result<DataFrame> {
    summary.original_columns = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    summary.input_rows = df.height();

    let resolved = resolve_stage(&df, rules, summary);
    summary.advance(TableStage::RoleResolved);

    let derived = validate_stage(&mut df, &resolved, options, summary)?;
    summary.advance(TableStage::Validated);

    summary.duplicates_removed = drop_duplicate_rows(&mut df)?;
    debug!(removed = summary.duplicates_removed, "duplicates removed");
    summary.advance(TableStage::Deduplicated);

    let exempt: &[&str] = if derived { &[DAYS_BETWEEN_COLUMN] } else { &[] };
    summary.missing_filled = fill_missing(&mut df, exempt)?;
    debug!(filled = summary.missing_filled, "missing values filled");
    summary.advance(TableStage::Reconciled);

    summary.output_rows = df.height();
    Ok(df)
}

fn resolve_stage(
    df: &DataFrame,
    rules: &RuleTable,
    summary: &mut CleaningSummary,
) -> ResolvedRoles {
    let resolved = resolve(df, rules);
    summary.resolved = resolved
        .iter()
        .map(|(role, column)| (role, column.to_string()))
        .collect();
    for unresolved in resolved.unresolved() {
        match &unresolved.reason {
            UnresolvedReason::NoAliasMatched => {
                debug!(role = %unresolved.role, "role not present");
            }
            reason @ UnresolvedReason::ClaimedBy { .. } => {
                summary.record_unresolved(unresolved.role, reason.to_string());
            }
        }
    }
    debug!(resolved = resolved.len(), "roles resolved");
    resolved
}

fn validate_stage(
    df: &mut DataFrame,
    resolved: &ResolvedRoles,
    options: &CleaningOptions,
    summary: &mut CleaningSummary,
) -> Result<bool> {
    for (role, column) in resolved.iter() {
        let kind = role.kind();
        if kind.is_date() {
            let report = normalize_date_column(df, column)?;
            summary.record_issue(
                IssueKind::DateUnparseable,
                Some(role),
                Some(column),
                report.unparseable,
            );
            debug!(
                role = %role,
                column,
                parsed = report.parsed,
                passed_through = report.passed_through,
                unparseable = report.unparseable,
                "dates normalized"
            );
        } else {
            let invalid = apply_field_rule(df, column, kind)?;
            summary.record_issue(IssueKind::FormatInvalid, Some(role), Some(column), invalid);
            debug!(role = %role, column, invalid, "field validated");
        }
    }

    if let Some(column) = resolved.column(Role::BirthDate) {
        let nulled = apply_age_bounds(df, column, options.reference_year, &options.age_bounds)?;
        summary.record_issue(
            IssueKind::AgeOutOfRange,
            Some(Role::BirthDate),
            Some(column),
            nulled,
        );
    }

    let mut derived = false;
    if options.derive_days_between {
        match (
            resolved.column(Role::CheckoutDate),
            resolved.column(Role::ReturnDate),
        ) {
            (Some(checkout), Some(returned)) => {
                let missing = add_days_between(df, checkout, returned)?;
                debug!(missing, "days_between derived");
                derived = true;
            }
            (checkout, returned) => {
                for (role, found) in [
                    (Role::CheckoutDate, checkout),
                    (Role::ReturnDate, returned),
                ] {
                    if found.is_none() {
                        summary.record_unresolved(role, "required for days_between");
                    }
                }
            }
        }
    }

    Ok(derived)
}
