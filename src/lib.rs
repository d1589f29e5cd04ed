//! Rule-based data quality review of eBird checklists.
//!
//! [`logic::RulesEngine`] holds the ordered check registry. Callers load
//! [`models::ChecklistRecord`]s (see [`logic::import`]), evaluate them against a
//! [`models::ChecksConfig`] overlay and turn the flagged results into outreach
//! emails with [`logic::outreach`].

pub mod config;
pub mod error;
pub mod logic;
pub mod models;

pub use error::{Result, ReviewError};
pub use logic::RulesEngine;
