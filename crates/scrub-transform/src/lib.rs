//! Record cleaning transformations.
//!
//! This crate provides the per-table cleaning stages:
//!
//! - **resolver**: map column labels to semantic roles through the rule table
//! - **validators**: name, address, postcode, phone and email rules
//! - **datetime**: day-first date normalization and the birth-date age check
//! - **derived**: the `days_between` field
//! - **dedupe**: exact duplicate row removal
//! - **reconcile**: type-aware missing-value filling
//! - **pipeline**: the stages above in order, with stage tracking
//! - **data_utils**: DataFrame value extraction and string helpers

pub mod data_utils;
pub mod datetime;
pub mod dedupe;
pub mod derived;
pub mod error;
pub mod pipeline;
pub mod reconcile;
pub mod resolver;
pub mod validators;

pub use data_utils::{strip_quotes, title_case};
pub use datetime::{DateCell, DateColumnReport, age_in_range, normalize_date};
pub use error::{Result, TransformError};
pub use pipeline::clean_table;
pub use resolver::{resolve, resolve_columns};
pub use validators::{CellCheck, check_email, check_phone, clean_address, clean_name};
