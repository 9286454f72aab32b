//! Canonical rule table: one alias list per role.
//!
//! Every stage that needs to know "which column is the phone number" goes
//! through this table via the role resolver. The table is built once per run
//! and never mutated while tables are being processed.

use serde::{Deserialize, Serialize};

use crate::role::{FieldKind, Role};

/// Built-in alias lists, in role declaration order.
const DEFAULT_ALIASES: &[(Role, &[&str])] = &[
    (Role::FullName, &["Full Name", "Name", "full_name"]),
    (Role::GivenName, &["First Name", "Given Name", "first_name"]),
    (Role::FamilyName, &["Last Name", "Surname", "last_name"]),
    (
        Role::Address,
        &[
            "Address",
            "Street Address",
            "Home Address",
            "Postal Address",
            "address",
        ],
    ),
    (
        Role::Postcode,
        &[
            "Postcode",
            "Post Code",
            "Postal Code",
            "ZIP",
            "Zip Code",
            "postcode",
        ],
    ),
    (
        Role::Phone,
        &[
            "Phone",
            "Phone Number",
            "Mobile",
            "Contact No",
            "Tel",
            "telephone",
        ],
    ),
    (Role::Email, &["Email", "E-mail", "Email Address", "email"]),
    (
        Role::BirthDate,
        &["Date of Birth", "DOB", "Birth Date", "date_of_birth"],
    ),
    (Role::JoinDate, &["Join Date", "Registration Date"]),
    (Role::CheckoutDate, &["Book checkout", "Checkout Date"]),
    (Role::ReturnDate, &["Book Returned", "Return Date"]),
];

/// Ordered candidate column labels for one role. First match wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAliasSet {
    pub role: Role,
    pub aliases: Vec<String>,
}

impl RoleAliasSet {
    pub fn new<I, S>(role: Role, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            role,
            aliases: aliases.into_iter().map(Into::into).collect(),
        }
    }

    /// Cleaning rule applied to the column this set resolves to.
    pub fn kind(&self) -> FieldKind {
        self.role.kind()
    }
}

/// The full set of alias lists, kept in role declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTable {
    sets: Vec<RoleAliasSet>,
}

impl Default for RuleTable {
    fn default() -> Self {
        let sets = DEFAULT_ALIASES
            .iter()
            .map(|(role, aliases)| RoleAliasSet::new(*role, aliases.iter().copied()))
            .collect();
        Self { sets }
    }
}

impl RuleTable {
    /// Build a table from explicit alias sets. Sets are re-ordered by role
    /// priority; a later set for the same role replaces an earlier one.
    pub fn from_sets(sets: impl IntoIterator<Item = RoleAliasSet>) -> Self {
        let mut table = Self { sets: Vec::new() };
        for set in sets {
            table.upsert(set);
        }
        table
    }

    /// Replace the alias list for `role`, keeping declaration order.
    #[must_use]
    pub fn with_aliases<I, S>(mut self, role: Role, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.upsert(RoleAliasSet::new(role, aliases));
        self
    }

    fn upsert(&mut self, set: RoleAliasSet) {
        if let Some(existing) = self.sets.iter_mut().find(|s| s.role == set.role) {
            *existing = set;
        } else {
            self.sets.push(set);
            self.sets.sort_by_key(|s| s.role.priority());
        }
    }

    /// Alias list for `role`, if the table declares it.
    pub fn aliases(&self, role: Role) -> Option<&[String]> {
        self.sets
            .iter()
            .find(|set| set.role == role)
            .map(|set| set.aliases.as_slice())
    }

    /// Iterate alias sets in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &RoleAliasSet> {
        self.sets.iter()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
