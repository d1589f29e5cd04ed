use super::{start_hh_mm, Rule, Thresholds};
use crate::models::ChecklistRecord;

pub struct MidnightRule;

impl Rule for MidnightRule {
    fn id(&self) -> &'static str {
        "midnight"
    }

    fn label(&self) -> &'static str {
        "Starting at exactly midnight"
    }

    fn description(&self) -> &'static str {
        "Flags checklists that start at exactly midnight (00:00), which is often incorrect \
         timing as most birding doesn't start precisely at midnight."
    }

    fn check(&self, checklist: &ChecklistRecord, _thresholds: &Thresholds) -> bool {
        checklist
            .start_time
            .as_ref()
            .is_some_and(|t| t.is_exact_midnight())
    }

    fn message(&self, checklist: &ChecklistRecord, _thresholds: &Thresholds) -> String {
        format!(
            "Your checklist starts at exactly midnight ({}). Please verify the start time, as \
             most birding does not begin at midnight. If this is incorrect, update the time to \
             reflect your actual start.",
            start_hh_mm(checklist)
        )
    }
}
