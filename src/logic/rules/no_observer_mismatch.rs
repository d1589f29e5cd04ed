use super::{Rule, Thresholds};
use crate::models::ChecklistRecord;

pub struct NoObserverMismatchRule;

impl Rule for NoObserverMismatchRule {
    fn id(&self) -> &'static str {
        "no_observer_mismatch"
    }

    fn label(&self) -> &'static str {
        "Shared checklists with observer count mismatch"
    }

    fn description(&self) -> &'static str {
        "Detects checklists shared with more people than the number of observers indicated, \
         suggesting potential data inconsistencies."
    }

    fn selected_by_default(&self) -> bool {
        false
    }

    fn check(&self, checklist: &ChecklistRecord, _thresholds: &Thresholds) -> bool {
        match (checklist.no_checklists, checklist.number_observers) {
            (Some(shared), Some(observers)) => shared > observers,
            _ => false,
        }
    }

    fn message(&self, _checklist: &ChecklistRecord, _thresholds: &Thresholds) -> String {
        "Your checklist is shared with more people than the number of observers indicated. \
         Please verify the observer count and sharing settings."
            .to_string()
    }
}
