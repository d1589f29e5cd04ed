pub mod ampm;
pub mod complete_media;
pub mod engine;
pub mod high_number_species;
pub mod midnight;
pub mod multi_day;
pub mod no_observer_mismatch;
pub mod not_stationary;
pub mod not_traveling;
pub mod only_one_species;
pub mod pelagic_too_long;
pub mod same_count_all_species;
pub mod specialized_protocol;
pub mod too_fast;
pub mod too_short_duration;

pub use engine::RulesEngine;

use crate::models::{CheckSettings, ChecklistRecord};
use std::collections::BTreeMap;

/// Which side of a threshold triggers the check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Triggers when the observed value exceeds the threshold.
    Ceiling,
    /// Triggers when the observed value falls below the threshold.
    Floor,
}

/// A named, user-configurable numeric parameter of a check.
///
/// `min` and `step` are hints for input validation; checks never enforce them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub default_value: f64,
    pub min: Option<f64>,
    pub step: Option<f64>,
    pub bound: Bound,
}

/// Threshold values resolved for one check: overlay value, else default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Thresholds {
    values: BTreeMap<&'static str, f64>,
}

impl Thresholds {
    pub fn resolve(specs: &[ThresholdSpec], settings: Option<&CheckSettings>) -> Self {
        let values = specs
            .iter()
            .map(|spec| {
                let value = settings
                    .and_then(|s| s.thresholds.get(spec.key))
                    .copied()
                    .unwrap_or(spec.default_value);
                (spec.key, value)
            })
            .collect();
        Self { values }
    }

    pub fn defaults(specs: &[ThresholdSpec]) -> Self {
        Self::resolve(specs, None)
    }

    /// Undeclared keys read as NaN, so any comparison against them is false.
    pub fn get(&self, key: &str) -> f64 {
        self.values.get(key).copied().unwrap_or(f64::NAN)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }
}

/// A data quality check over one checklist.
///
/// `check` and `message` must be pure. `message` is only called after `check`
/// returned true for the same inputs.
pub trait Rule: Send + Sync {
    /// Unique, stable identifier
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn label(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn selected_by_default(&self) -> bool {
        true
    }

    fn thresholds(&self) -> &'static [ThresholdSpec] {
        &[]
    }

    /// Whether the checklist shows the suspicious pattern
    fn check(&self, checklist: &ChecklistRecord, thresholds: &Thresholds) -> bool;

    /// Outreach text explaining the finding to the observer
    fn message(&self, checklist: &ChecklistRecord, thresholds: &Thresholds) -> String;
}

/// Renders an optional value for message text.
pub(crate) fn shown<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "unknown".to_string(), |v| v.to_string())
}

/// Start time as `HH:MM` for message text, empty when unknown.
pub(crate) fn start_hh_mm(checklist: &ChecklistRecord) -> String {
    checklist
        .start_time
        .as_ref()
        .map(|t| t.hh_mm())
        .unwrap_or_default()
}
