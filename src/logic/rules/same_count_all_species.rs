use super::{Bound, Rule, ThresholdSpec, Thresholds};
use crate::models::ChecklistRecord;

/// Complete checklists where every species carries the same count.
pub struct SameCountAllSpeciesRule;

impl SameCountAllSpeciesRule {
    const THRESHOLDS: &'static [ThresholdSpec] = &[ThresholdSpec {
        key: "minSpeciesForSameCount",
        label: "Min species",
        description: "Flag when more than this many species all have the same count",
        default_value: 5.0,
        min: Some(1.0),
        step: Some(1.0),
        bound: Bound::Ceiling,
    }];
}

impl Rule for SameCountAllSpeciesRule {
    fn id(&self) -> &'static str {
        "same_count_all_species"
    }

    fn label(&self) -> &'static str {
        "All species have identical counts"
    }

    fn description(&self) -> &'static str {
        "Detects complete checklists where all species have the same count value, which may \
         indicate data entry shortcuts or errors (counts should often be 'X' instead)."
    }

    fn thresholds(&self) -> &'static [ThresholdSpec] {
        Self::THRESHOLDS
    }

    fn check(&self, checklist: &ChecklistRecord, thresholds: &Thresholds) -> bool {
        checklist.is_complete()
            && checklist.median_count.is_some_and(|m| m > 0.0)
            && checklist.number_unique_count == Some(1)
            && checklist
                .number_species
                .is_some_and(|n| f64::from(n) > thresholds.get("minSpeciesForSameCount"))
    }

    fn message(&self, _checklist: &ChecklistRecord, _thresholds: &Thresholds) -> String {
        "Your checklist has all species with identical counts. This may indicate a data entry \
         shortcut or error. Please review and update counts as needed, or use 'X' for \
         presence-only records."
            .to_string()
    }
}
