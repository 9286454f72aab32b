//! Per-table role resolution result.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// Why a role did not resolve on a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnresolvedReason {
    /// None of the role's aliases is a column label.
    NoAliasMatched,
    /// The first matching column was already taken by an earlier role.
    ClaimedBy { column: String, role: Role },
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnresolvedReason::NoAliasMatched => write!(f, "no alias matched"),
            UnresolvedReason::ClaimedBy { column, role } => {
                write!(f, "column '{column}' already resolved to {role}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedRole {
    pub role: Role,
    pub reason: UnresolvedReason,
}

/// Mapping from role to the concrete column label found in one table.
///
/// Built fresh for every table; later stages read columns through this map
/// and never re-scan raw labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRoles {
    columns: BTreeMap<Role, String>,
    unresolved: Vec<UnresolvedRole>,
}

impl ResolvedRoles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, role: Role, column: impl Into<String>) {
        self.columns.insert(role, column.into());
    }

    pub fn mark_unresolved(&mut self, role: Role, reason: UnresolvedReason) {
        self.unresolved.push(UnresolvedRole { role, reason });
    }

    /// Column label resolved for `role`.
    pub fn column(&self, role: Role) -> Option<&str> {
        self.columns.get(&role).map(String::as_str)
    }

    pub fn is_resolved(&self, role: Role) -> bool {
        self.columns.contains_key(&role)
    }

    /// Role that owns `column`, if any.
    pub fn role_for_column(&self, column: &str) -> Option<Role> {
        self.columns
            .iter()
            .find(|(_, label)| label.as_str() == column)
            .map(|(role, _)| *role)
    }

    /// Resolved (role, column) pairs in role priority order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, &str)> {
        self.columns
            .iter()
            .map(|(role, column)| (*role, column.as_str()))
    }

    pub fn unresolved(&self) -> &[UnresolvedRole] {
        &self.unresolved
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
