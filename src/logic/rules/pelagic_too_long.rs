use super::{shown, Bound, Rule, ThresholdSpec, Thresholds};
use crate::models::{ChecklistRecord, Protocol};

/// Pelagic protocol checklists longer than the recommended maximum.
pub struct PelagicTooLongRule;

impl PelagicTooLongRule {
    const THRESHOLDS: &'static [ThresholdSpec] = &[ThresholdSpec {
        key: "maxPelagicDurationMinutes",
        label: "Max duration (min)",
        description: "Flag pelagic checklists longer than this duration",
        default_value: 75.0,
        min: Some(1.0),
        step: Some(1.0),
        bound: Bound::Ceiling,
    }];
}

impl Rule for PelagicTooLongRule {
    fn id(&self) -> &'static str {
        "pelagic_too_long"
    }

    fn label(&self) -> &'static str {
        "Pelagic checklists with excessive duration"
    }

    fn description(&self) -> &'static str {
        "Flags pelagic protocol checklists that exceed the recommended maximum duration, which \
         may indicate protocol misuse or data entry errors."
    }

    fn selected_by_default(&self) -> bool {
        false
    }

    fn thresholds(&self) -> &'static [ThresholdSpec] {
        Self::THRESHOLDS
    }

    fn check(&self, checklist: &ChecklistRecord, thresholds: &Thresholds) -> bool {
        checklist.protocol() == Some(Protocol::Pelagic)
            && checklist
                .duration_minutes
                .is_some_and(|d| d > thresholds.get("maxPelagicDurationMinutes"))
    }

    fn message(&self, checklist: &ChecklistRecord, _thresholds: &Thresholds) -> String {
        format!(
            "Your pelagic checklist has a duration of {} minutes, which exceeds the recommended \
             maximum. Please review the duration and split the checklist if necessary.",
            shown(checklist.duration_minutes)
        )
    }
}
