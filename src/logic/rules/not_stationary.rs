use super::{shown, Bound, Rule, ThresholdSpec, Thresholds};
use crate::models::{ChecklistRecord, Protocol};

/// Stationary counts with more species than a single spot usually yields.
pub struct NotStationaryRule;

impl NotStationaryRule {
    const THRESHOLDS: &'static [ThresholdSpec] = &[ThresholdSpec {
        key: "tooManySpeciesStationary",
        label: "Max species",
        description: "Flag stationary checklists with more species than this limit",
        default_value: 50.0,
        min: Some(1.0),
        step: Some(1.0),
        bound: Bound::Ceiling,
    }];
}

impl Rule for NotStationaryRule {
    fn id(&self) -> &'static str {
        "not_stationary"
    }

    fn label(&self) -> &'static str {
        "High species count with stationary protocol"
    }

    fn description(&self) -> &'static str {
        "Detects stationary protocol checklists with unusually high species counts that may \
         suggest the observer was actually traveling."
    }

    fn thresholds(&self) -> &'static [ThresholdSpec] {
        Self::THRESHOLDS
    }

    fn check(&self, checklist: &ChecklistRecord, thresholds: &Thresholds) -> bool {
        checklist.protocol() == Some(Protocol::Stationary)
            && checklist
                .number_species
                .is_some_and(|n| f64::from(n) > thresholds.get("tooManySpeciesStationary"))
    }

    fn message(&self, checklist: &ChecklistRecord, _thresholds: &Thresholds) -> String {
        format!(
            "Your stationary checklist reports a high number of species ({}). Please confirm \
             that the stationary protocol is appropriate, or consider using the traveling \
             protocol if you moved during the checklist.",
            shown(checklist.number_species)
        )
    }
}
