//! Role resolution: map a table's column labels to semantic roles.

use std::collections::BTreeMap;

use polars::prelude::DataFrame;
use scrub_model::{ResolvedRoles, Role, RuleTable, UnresolvedReason};

/// Resolve every role in `rules` against the labels in `columns`.
///
/// Roles are visited in priority order; for each, the first alias that is a
/// column label wins. A column already taken by an earlier role leaves the
/// later role unresolved. Matching is exact on the normalized label.
pub fn resolve_columns<'a>(
    columns: impl IntoIterator<Item = &'a str>,
    rules: &RuleTable,
) -> ResolvedRoles {
    let labels: Vec<&str> = columns.into_iter().collect();
    let mut claimed: BTreeMap<&str, Role> = BTreeMap::new();
    let mut resolved = ResolvedRoles::new();

    for set in rules.iter() {
        let Some(column) = set
            .aliases
            .iter()
            .find_map(|alias| labels.iter().copied().find(|label| *label == alias.as_str()))
        else {
            resolved.mark_unresolved(set.role, UnresolvedReason::NoAliasMatched);
            continue;
        };

        if let Some(owner) = claimed.get(column) {
            resolved.mark_unresolved(
                set.role,
                UnresolvedReason::ClaimedBy {
                    column: column.to_string(),
                    role: *owner,
                },
            );
            continue;
        }

        claimed.insert(column, set.role);
        resolved.insert(set.role, column);
    }

    resolved
}

/// Resolve roles against a frame's column labels. Does not touch the frame.
pub fn resolve(df: &DataFrame, rules: &RuleTable) -> ResolvedRoles {
    resolve_columns(df.get_column_names().iter().map(|name| name.as_str()), rules)
}
