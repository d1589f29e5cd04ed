use super::{Rule, Thresholds};
use crate::models::ChecklistRecord;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Daytime checklists whose start plus duration runs past midnight.
pub struct MultiDayRule;

impl Rule for MultiDayRule {
    fn id(&self) -> &'static str {
        "multi_day"
    }

    fn label(&self) -> &'static str {
        "Checklists spanning multiple calendar days"
    }

    fn description(&self) -> &'static str {
        "Identifies checklists where the start time plus duration extends past midnight into \
         the next day, which violates eBird's single-day checklist rule."
    }

    fn selected_by_default(&self) -> bool {
        false
    }

    fn check(&self, checklist: &ChecklistRecord, _thresholds: &Thresholds) -> bool {
        if checklist.is_nocturnal() {
            return false;
        }
        match (checklist.start_seconds(), checklist.duration_minutes) {
            (Some(start), Some(duration)) => f64::from(start) + duration * 60.0 > SECONDS_PER_DAY,
            _ => false,
        }
    }

    fn message(&self, _checklist: &ChecklistRecord, _thresholds: &Thresholds) -> String {
        "Your checklist appears to span multiple calendar days. eBird checklists should only \
         cover a single day. Please split your checklist if it covers more than one day."
            .to_string()
    }
}
