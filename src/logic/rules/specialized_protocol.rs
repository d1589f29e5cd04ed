use super::{Rule, Thresholds};
use crate::models::ChecklistRecord;

/// Anything outside the four everyday protocols.
pub struct SpecializedProtocolRule;

impl Rule for SpecializedProtocolRule {
    fn id(&self) -> &'static str {
        "specialized_protocol"
    }

    fn label(&self) -> &'static str {
        "Non-standard protocols"
    }

    fn description(&self) -> &'static str {
        "Identifies checklists using specialized or uncommon protocols that may require \
         additional review to ensure proper usage."
    }

    fn selected_by_default(&self) -> bool {
        false
    }

    // A checklist without a protocol is not reported as specialized.
    fn check(&self, checklist: &ChecklistRecord, _thresholds: &Thresholds) -> bool {
        checklist.protocol().is_some_and(|p| !p.is_standard())
    }

    fn message(&self, _checklist: &ChecklistRecord, _thresholds: &Thresholds) -> String {
        "Your checklist uses a specialized protocol. Please ensure that this protocol is \
         appropriate for your birding activity."
            .to_string()
    }
}
