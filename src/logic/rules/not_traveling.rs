use super::{shown, Bound, Rule, ThresholdSpec, Thresholds};
use crate::models::{ChecklistRecord, Protocol};

/// Traveling checklists that barely moved.
pub struct NotTravelingRule;

impl NotTravelingRule {
    const THRESHOLDS: &'static [ThresholdSpec] = &[ThresholdSpec {
        key: "maxTravelingDistanceKm",
        label: "Min distance (km)",
        description: "Flag traveling checklists with less distance than this threshold",
        default_value: 0.03,
        min: Some(0.0),
        step: Some(0.01),
        bound: Bound::Floor,
    }];
}

impl Rule for NotTravelingRule {
    fn id(&self) -> &'static str {
        "not_traveling"
    }

    fn label(&self) -> &'static str {
        "Traveling checklists with minimal distance"
    }

    fn description(&self) -> &'static str {
        "Identifies traveling protocol checklists with very short distances that should \
         probably use the stationary protocol instead."
    }

    fn selected_by_default(&self) -> bool {
        false
    }

    fn thresholds(&self) -> &'static [ThresholdSpec] {
        Self::THRESHOLDS
    }

    fn check(&self, checklist: &ChecklistRecord, thresholds: &Thresholds) -> bool {
        checklist.protocol() == Some(Protocol::Traveling)
            && checklist
                .effort_distance_km
                .is_some_and(|d| d < thresholds.get("maxTravelingDistanceKm"))
    }

    fn message(&self, checklist: &ChecklistRecord, _thresholds: &Thresholds) -> String {
        format!(
            "Your traveling checklist covers a very short distance ({} km). Below 30m, eBird \
             suggests using the Stationary protocol. Please use the stationary protocol if \
             relevant or correct the distance.",
            shown(checklist.effort_distance_km)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_protocol(name: &str) -> ChecklistRecord {
        ChecklistRecord {
            protocol_name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn not_traveling_flags_tiny_distances() {
        let rule = NotTravelingRule;
        let t = Thresholds::defaults(rule.thresholds());
        let mut record = ChecklistRecord {
            effort_distance_km: Some(0.01),
            ..with_protocol("Traveling")
        };
        assert!(rule.check(&record, &t));
        assert!(rule.message(&record, &t).contains("(0.01 km)"));

        record.effort_distance_km = Some(0.03);
        assert!(!rule.check(&record, &t));

        record.effort_distance_km = None;
        assert!(!rule.check(&record, &t));

        let stationary = ChecklistRecord {
            effort_distance_km: Some(0.0),
            ..with_protocol("Stationary")
        };
        assert!(!rule.check(&stationary, &t));
    }
}
