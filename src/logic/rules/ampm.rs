use super::{shown, start_hh_mm, Bound, Rule, ThresholdSpec, Thresholds};
use crate::models::ChecklistRecord;

/// Night-time checklists with a daytime-sized species list, usually an AM/PM mix-up.
pub struct AmPmRule;

impl AmPmRule {
    const THRESHOLDS: &'static [ThresholdSpec] = &[ThresholdSpec {
        key: "minSpeciesForAmPm",
        label: "Min species",
        description: "Flag nighttime checklists when species count exceeds this threshold",
        default_value: 10.0,
        min: Some(1.0),
        step: Some(1.0),
        bound: Bound::Ceiling,
    }];
}

impl Rule for AmPmRule {
    fn id(&self) -> &'static str {
        "ampm"
    }

    fn label(&self) -> &'static str {
        "High species count during the night"
    }

    fn description(&self) -> &'static str {
        "Typically involves issues with AM/PM start time."
    }

    fn thresholds(&self) -> &'static [ThresholdSpec] {
        Self::THRESHOLDS
    }

    fn check(&self, checklist: &ChecklistRecord, thresholds: &Thresholds) -> bool {
        checklist.is_nocturnal()
            && checklist
                .number_species
                .is_some_and(|n| f64::from(n) > thresholds.get("minSpeciesForAmPm"))
    }

    fn message(&self, checklist: &ChecklistRecord, _thresholds: &Thresholds) -> String {
        format!(
            "We noticed that your checklist started at {} and reported {} species. Since this \
             is a nighttime checklist, it's possible that the AM/PM designation might be \
             incorrect.",
            start_hh_mm(checklist),
            shown(checklist.number_species)
        )
    }
}
