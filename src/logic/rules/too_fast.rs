use super::{Bound, Rule, ThresholdSpec, Thresholds};
use crate::models::ChecklistRecord;

/// Travel speeds no birder on foot or by car covers while counting.
pub struct TooFastRule;

impl TooFastRule {
    const THRESHOLDS: &'static [ThresholdSpec] = &[ThresholdSpec {
        key: "maxSpeedKmPerHour",
        label: "Max speed (km/h)",
        description: "Flag when calculated travel speed exceeds this limit",
        default_value: 60.0,
        min: Some(1.0),
        step: Some(1.0),
        bound: Bound::Ceiling,
    }];
}

impl Rule for TooFastRule {
    fn id(&self) -> &'static str {
        "too_fast"
    }

    fn label(&self) -> &'static str {
        "Unrealistic travel speed"
    }

    fn description(&self) -> &'static str {
        "Calculates travel speed from distance and duration to identify checklists with \
         impossible or unrealistic movement speeds."
    }

    fn thresholds(&self) -> &'static [ThresholdSpec] {
        Self::THRESHOLDS
    }

    fn check(&self, checklist: &ChecklistRecord, thresholds: &Thresholds) -> bool {
        checklist
            .speed_kmh()
            .is_some_and(|speed| speed > thresholds.get("maxSpeedKmPerHour"))
    }

    fn message(&self, checklist: &ChecklistRecord, _thresholds: &Thresholds) -> String {
        let speed = checklist
            .speed_kmh()
            .map_or_else(|| "unknown".to_string(), |s| format!("{:.2}", round_half_up(s)));
        format!(
            "Your checklist shows a calculated travel speed of {} km/h, which is unusually \
             high. Please verify the distance and/or duration.",
            speed
        )
    }
}

/// Two decimals, exact ties rounded up.
fn round_half_up(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
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
    fn too_fast_reports_speed_with_two_decimals() {
        let rule = TooFastRule;
        let t = Thresholds::defaults(rule.thresholds());
        let record = ChecklistRecord {
            effort_distance_km: Some(10.0),
            duration_minutes: Some(5.0),
            ..with_protocol("Traveling")
        };
        assert!(rule.check(&record, &t));
        assert!(rule.message(&record, &t).contains("120.00 km/h"));
    }

    #[test]
    fn too_fast_rounds_ties_up() {
        let rule = TooFastRule;
        let t = Thresholds::defaults(rule.thresholds());
        // 1.09375 km in one minute is exactly 65.625 km/h
        let record = ChecklistRecord {
            effort_distance_km: Some(1.09375),
            duration_minutes: Some(1.0),
            ..Default::default()
        };
        assert!(rule.check(&record, &t));
        assert!(rule.message(&record, &t).contains("65.63 km/h"));
    }

    #[test]
    fn too_fast_guards_zero_duration() {
        let rule = TooFastRule;
        let t = Thresholds::defaults(rule.thresholds());
        let record = ChecklistRecord {
            effort_distance_km: Some(10.0),
            duration_minutes: Some(0.0),
            ..with_protocol("Traveling")
        };
        assert!(!rule.check(&record, &t));

        let no_distance = ChecklistRecord {
            duration_minutes: Some(5.0),
            ..Default::default()
        };
        assert!(!rule.check(&no_distance, &t));
    }

    #[test]
    fn too_fast_is_protocol_agnostic() {
        let rule = TooFastRule;
        let record = ChecklistRecord {
            effort_distance_km: Some(50.0),
            duration_minutes: Some(30.0),
            ..Default::default()
        };
        let t = Thresholds::defaults(rule.thresholds());
        assert!(rule.check(&record, &t));
    }
}
