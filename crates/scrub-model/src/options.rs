//! Options controlling one cleaning run.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScrubError};

/// Inclusive age range accepted for a birth date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBounds {
    pub min: i32,
    pub max: i32,
}

impl Default for AgeBounds {
    fn default() -> Self {
        Self { min: 1, max: 120 }
    }
}

impl AgeBounds {
    pub fn new(min: i32, max: i32) -> Result<Self> {
        if min > max {
            return Err(ScrubError::InvalidAgeBounds { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, age: i32) -> bool {
        age >= self.min && age <= self.max
    }
}

/// Options shared by every table in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningOptions {
    /// Accepted age range for the birth-date role.
    pub age_bounds: AgeBounds,
    /// Year ages are computed against (`age = reference_year - birth_year`).
    pub reference_year: i32,
    /// Compute the `days_between` column when checkout and return dates resolve.
    pub derive_days_between: bool,
}

impl CleaningOptions {
    pub fn new(reference_year: i32) -> Self {
        Self {
            age_bounds: AgeBounds::default(),
            reference_year,
            derive_days_between: false,
        }
    }

    #[must_use]
    pub fn with_age_bounds(mut self, bounds: AgeBounds) -> Self {
        self.age_bounds = bounds;
        self
    }

    #[must_use]
    pub fn with_days_between(mut self, enable: bool) -> Self {
        self.derive_days_between = enable;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bounds_are_inclusive() {
        let bounds = AgeBounds::default();
        assert!(bounds.contains(1));
        assert!(bounds.contains(120));
        assert!(!bounds.contains(0));
        assert!(!bounds.contains(121));
    }

    #[test]
    fn inverted_bounds_rejected() {
        assert_eq!(
            AgeBounds::new(50, 10),
            Err(ScrubError::InvalidAgeBounds { min: 50, max: 10 })
        );
    }
}
