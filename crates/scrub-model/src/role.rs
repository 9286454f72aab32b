//! Semantic roles a column can play.
//!
//! A role is independent of the literal column label: "DOB", "Date of Birth"
//! and "date_of_birth" all play [`Role::BirthDate`]. Each role carries a
//! [`FieldKind`] that selects the cleaning rule applied to its column.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ScrubError;

/// Semantic role of a column, in declaration (priority) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    FullName,
    GivenName,
    FamilyName,
    Address,
    Postcode,
    Phone,
    Email,
    BirthDate,
    JoinDate,
    CheckoutDate,
    ReturnDate,
}

impl Role {
    /// All roles in declaration order. Earlier roles win column conflicts.
    pub const ALL: [Role; 11] = [
        Role::FullName,
        Role::GivenName,
        Role::FamilyName,
        Role::Address,
        Role::Postcode,
        Role::Phone,
        Role::Email,
        Role::BirthDate,
        Role::JoinDate,
        Role::CheckoutDate,
        Role::ReturnDate,
    ];

    /// Returns the configuration key for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::FullName => "full_name",
            Role::GivenName => "given_name",
            Role::FamilyName => "family_name",
            Role::Address => "address",
            Role::Postcode => "postcode",
            Role::Phone => "phone",
            Role::Email => "email",
            Role::BirthDate => "birth_date",
            Role::JoinDate => "join_date",
            Role::CheckoutDate => "checkout_date",
            Role::ReturnDate => "return_date",
        }
    }

    /// Returns the cleaning rule kind for this role.
    pub fn kind(&self) -> FieldKind {
        match self {
            Role::FullName | Role::GivenName | Role::FamilyName => FieldKind::Name,
            Role::Address => FieldKind::Address,
            Role::Postcode => FieldKind::Postcode,
            Role::Phone => FieldKind::Phone,
            Role::Email => FieldKind::Email,
            Role::BirthDate => FieldKind::BirthDate,
            Role::JoinDate | Role::CheckoutDate | Role::ReturnDate => FieldKind::Date,
        }
    }

    /// Position in declaration order.
    pub fn priority(&self) -> usize {
        Role::ALL
            .iter()
            .position(|role| role == self)
            .unwrap_or(Role::ALL.len())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = ScrubError;

    /// Parse a role key (case-insensitive, `-` and spaces accepted for `_`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        Role::ALL
            .iter()
            .copied()
            .find(|role| role.as_str() == normalized)
            .ok_or_else(|| ScrubError::UnknownRole(s.trim().to_string()))
    }
}

/// Cleaning rule family applied to a resolved column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// Letters and whitespace only, title-cased; missing becomes "Unknown".
    Name,
    /// Trimmed and title-cased; no character filtering.
    Address,
    /// Uppercased, trimmed and checked against the UK shape.
    Postcode,
    /// Optional `+` and 10-15 digits, otherwise "Invalid".
    Phone,
    /// `local@domain.tld`, otherwise "Invalid".
    Email,
    /// Day-first date that is also subject to the age range check.
    BirthDate,
    /// Day-first date.
    Date,
}

impl FieldKind {
    /// Returns true for kinds handled by the date normalizer.
    pub fn is_date(&self) -> bool {
        matches!(self, FieldKind::BirthDate | FieldKind::Date)
    }

    /// Returns a short display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Name => "Name",
            FieldKind::Address => "Address",
            FieldKind::Postcode => "Postcode",
            FieldKind::Phone => "Phone",
            FieldKind::Email => "Email",
            FieldKind::BirthDate => "Birth date",
            FieldKind::Date => "Date",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
