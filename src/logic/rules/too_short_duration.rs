use super::{shown, Bound, Rule, ThresholdSpec, Thresholds};
use crate::models::ChecklistRecord;

/// Complete checklists with an unrealistic species-per-minute rate.
pub struct TooShortDurationRule;

impl TooShortDurationRule {
    const THRESHOLDS: &'static [ThresholdSpec] = &[ThresholdSpec {
        key: "maxSpeciesPerMinute",
        label: "Max species/min",
        description: "Flag when species count per minute exceeds this rate",
        default_value: 10.0,
        min: Some(1.0),
        step: Some(1.0),
        bound: Bound::Ceiling,
    }];
}

impl Rule for TooShortDurationRule {
    fn id(&self) -> &'static str {
        "too_short_duration"
    }

    fn label(&self) -> &'static str {
        "High species count relative to time"
    }

    fn description(&self) -> &'static str {
        "Identifies checklists with an unrealistically high species-to-time ratio, suggesting \
         rushed or incomplete data entry."
    }

    fn thresholds(&self) -> &'static [ThresholdSpec] {
        Self::THRESHOLDS
    }

    fn check(&self, checklist: &ChecklistRecord, thresholds: &Thresholds) -> bool {
        if !checklist.is_complete() {
            return false;
        }
        match (checklist.number_species, checklist.duration_minutes) {
            (Some(species), Some(duration)) if duration > 0.0 => {
                f64::from(species) / duration > thresholds.get("maxSpeciesPerMinute")
            }
            _ => false,
        }
    }

    fn message(&self, checklist: &ChecklistRecord, _thresholds: &Thresholds) -> String {
        format!(
            "Your checklist reports a high species-to-time ratio ({} species in {} minutes). \
             Please confirm that all species were observed and the duration is correct.",
            shown(checklist.number_species),
            shown(checklist.duration_minutes)
        )
    }
}
