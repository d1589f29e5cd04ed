use super::{shown, Bound, Rule, ThresholdSpec, Thresholds};
use crate::models::ChecklistRecord;

/// Extremely high species totals: multi-day birding, list-building or data entry errors.
pub struct HighNumberSpeciesRule;

impl HighNumberSpeciesRule {
    const THRESHOLDS: &'static [ThresholdSpec] = &[ThresholdSpec {
        key: "tooManySpecies",
        label: "Max species",
        description: "Flag checklists with more species than this limit",
        default_value: 70.0,
        min: Some(1.0),
        step: Some(1.0),
        bound: Bound::Ceiling,
    }];
}

impl Rule for HighNumberSpeciesRule {
    fn id(&self) -> &'static str {
        "high_number_species"
    }

    fn label(&self) -> &'static str {
        "High species count"
    }

    fn description(&self) -> &'static str {
        "Detects checklists with extremely high species counts that may indicate multi-day \
         birding, list-building, or data entry errors."
    }

    fn thresholds(&self) -> &'static [ThresholdSpec] {
        Self::THRESHOLDS
    }

    fn check(&self, checklist: &ChecklistRecord, thresholds: &Thresholds) -> bool {
        checklist
            .number_species
            .is_some_and(|n| f64::from(n) > thresholds.get("tooManySpecies"))
    }

    fn message(&self, checklist: &ChecklistRecord, _thresholds: &Thresholds) -> String {
        format!(
            "Your checklist reports a high number of species ({}). Please confirm that this is \
             not a multi-day list or a data entry error. If correct, no action is needed. \
             Otherwise, consider splitting or correcting the checklist.",
            shown(checklist.number_species)
        )
    }
}
