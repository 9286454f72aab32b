//! TOML run configuration.
//!
//! ```toml
//! reference_year = 2024
//!
//! [age]
//! min = 1
//! max = 120
//!
//! [aliases]
//! phone = ["Phone", "Mobile Number"]
//! ```
//!
//! Every key is optional. Alias lists replace the built-in list for that
//! role; roles not named keep their defaults. Command-line flags override
//! the file.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Datelike;
use serde::Deserialize;

use scrub_model::{AgeBounds, CleaningOptions, Role, RuleTable};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub reference_year: Option<i32>,
    #[serde(default)]
    pub age: AgeSection,
    #[serde(default)]
    pub aliases: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgeSection {
    pub min: Option<i32>,
    pub max: Option<i32>,
}

/// Values given on the command line; `None` falls back to the file.
#[derive(Debug, Default, Clone, Copy)]
pub struct Overrides {
    pub reference_year: Option<i32>,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
}

pub fn load_config(path: &Path) -> Result<ConfigFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    parse_config(&text).with_context(|| format!("parse config {}", path.display()))
}

pub fn parse_config(text: &str) -> Result<ConfigFile> {
    Ok(toml::from_str(text)?)
}

impl ConfigFile {
    /// Built-in rule table with this file's alias lists applied.
    pub fn rule_table(&self) -> Result<RuleTable> {
        let mut rules = RuleTable::default();
        for (name, aliases) in &self.aliases {
            let role: Role = name
                .parse()
                .with_context(|| format!("[aliases] {name}"))?;
            rules = rules.with_aliases(role, aliases.iter().cloned());
        }
        Ok(rules)
    }

    /// Cleaning options from this file and the command-line overrides.
    pub fn cleaning_options(&self, overrides: Overrides) -> Result<CleaningOptions> {
        let defaults = AgeBounds::default();
        let min = overrides.min_age.or(self.age.min).unwrap_or(defaults.min);
        let max = overrides.max_age.or(self.age.max).unwrap_or(defaults.max);
        let bounds = AgeBounds::new(min, max).context("age bounds")?;
        let reference_year = overrides
            .reference_year
            .or(self.reference_year)
            .unwrap_or_else(current_year);
        Ok(CleaningOptions::new(reference_year).with_age_bounds(bounds))
    }
}

fn current_year() -> i32 {
    chrono::Local::now().year()
}
