use super::{shown, Bound, Rule, ThresholdSpec, Thresholds};
use crate::models::ChecklistRecord;

/// Complete daytime checklists listing a single species over a long period.
pub struct OnlyOneSpeciesRule;

impl OnlyOneSpeciesRule {
    const THRESHOLDS: &'static [ThresholdSpec] = &[ThresholdSpec {
        key: "minDurationForSingleSpecies",
        label: "Min duration (min)",
        description:
            "Flag complete checklists with one species when duration exceeds this threshold",
        default_value: 5.0,
        min: Some(1.0),
        step: Some(1.0),
        bound: Bound::Ceiling,
    }];
}

impl Rule for OnlyOneSpeciesRule {
    fn id(&self) -> &'static str {
        "only_one_species"
    }

    fn label(&self) -> &'static str {
        "Checklists with only one species"
    }

    fn description(&self) -> &'static str {
        "Identifies complete daytime checklists reporting only a single species over a \
         significant duration, possibly indicating the checklist should not be marked as \
         complete."
    }

    fn thresholds(&self) -> &'static [ThresholdSpec] {
        Self::THRESHOLDS
    }

    fn check(&self, checklist: &ChecklistRecord, thresholds: &Thresholds) -> bool {
        !checklist.is_nocturnal()
            && checklist.is_complete()
            && checklist.number_species.is_some_and(|n| n <= 1)
            && checklist
                .duration_minutes
                .is_some_and(|d| d > thresholds.get("minDurationForSingleSpecies"))
    }

    fn message(&self, checklist: &ChecklistRecord, _thresholds: &Thresholds) -> String {
        format!(
            "Your checklist is marked as complete but only reports one species over {} \
             minutes. Please confirm if all species were reported, or if the checklist should \
             not be marked as complete.",
            shown(checklist.duration_minutes)
        )
    }
}
