use super::checklist::value_as_f64;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Per-check overlay: selection flag and threshold values.
/// Anything left unset falls back to the check's defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub thresholds: BTreeMap<String, f64>,
}

impl CheckSettings {
    pub fn selected(selected: bool) -> Self {
        Self {
            selected: Some(selected),
            thresholds: BTreeMap::new(),
        }
    }

    pub fn with_threshold(mut self, key: &str, value: f64) -> Self {
        self.thresholds.insert(key.to_string(), value);
        self
    }
}

/// Overlay for one evaluation run, keyed by check id.
///
/// Deserialization is lenient per entry: an entry that is not a mapping, a
/// `selected` that is not a boolean, or a threshold that is not a number is
/// dropped and kept in `rejected`. The remaining entries still apply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Value>",
    into = "BTreeMap<String, CheckSettings>"
)]
pub struct ChecksConfig {
    pub checks: BTreeMap<String, CheckSettings>,
    pub rejected: Vec<ConfigIssue>,
}

impl From<BTreeMap<String, Value>> for ChecksConfig {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        let mut config = ChecksConfig::default();
        for (check_id, value) in entries {
            if let Some(settings) = read_settings(&check_id, value, &mut config.rejected) {
                config.checks.insert(check_id, settings);
            }
        }
        config
    }
}

impl From<ChecksConfig> for BTreeMap<String, CheckSettings> {
    fn from(config: ChecksConfig) -> Self {
        config.checks
    }
}

fn read_settings(
    check_id: &str,
    value: Value,
    rejected: &mut Vec<ConfigIssue>,
) -> Option<CheckSettings> {
    let mut reject = |field: &str, reason: &str| {
        rejected.push(ConfigIssue::Malformed {
            check_id: check_id.to_string(),
            field: field.to_string(),
            reason: reason.to_string(),
        })
    };

    let fields = match value {
        Value::Null => return Some(CheckSettings::default()),
        Value::Object(fields) => fields,
        _ => {
            reject("", "expected a mapping with `selected` and/or `thresholds`");
            return None;
        }
    };

    let mut settings = CheckSettings::default();
    for (field, value) in fields {
        match (field.as_str(), value) {
            ("selected", Value::Bool(b)) => settings.selected = Some(b),
            ("selected", Value::Null) => {}
            ("selected", _) => reject("selected", "expected true or false"),
            ("thresholds", Value::Object(thresholds)) => {
                for (key, value) in thresholds {
                    match value_as_f64(&value) {
                        Some(n) => {
                            settings.thresholds.insert(key, n);
                        }
                        None => reject(&format!("thresholds.{}", key), "expected a number"),
                    }
                }
            }
            ("thresholds", Value::Null) => {}
            ("thresholds", _) => reject("thresholds", "expected a mapping of threshold values"),
            (other, _) => reject(other, "unknown setting"),
        }
    }
    Some(settings)
}

impl ChecksConfig {
    pub fn get(&self, check_id: &str) -> Option<&CheckSettings> {
        self.checks.get(check_id)
    }

    pub fn set(&mut self, check_id: &str, settings: CheckSettings) {
        self.checks.insert(check_id.to_string(), settings);
    }

    pub fn with(mut self, check_id: &str, settings: CheckSettings) -> Self {
        self.set(check_id, settings);
        self
    }
}

/// A non-fatal problem found while validating a `ChecksConfig`.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigIssue {
    UnknownCheck {
        check_id: String,
    },
    UnknownThreshold {
        check_id: String,
        key: String,
    },
    NotFinite {
        check_id: String,
        key: String,
    },
    BelowMinimum {
        check_id: String,
        key: String,
        value: f64,
        min: f64,
    },
    /// An overlay entry or field that could not be read and was dropped.
    Malformed {
        check_id: String,
        field: String,
        reason: String,
    },
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigIssue::UnknownCheck { check_id } => {
                write!(f, "unknown check '{}' (ignored)", check_id)
            }
            ConfigIssue::UnknownThreshold { check_id, key } => {
                write!(f, "check '{}' has no threshold '{}' (ignored)", check_id, key)
            }
            ConfigIssue::NotFinite { check_id, key } => {
                write!(f, "check '{}': threshold '{}' is not a finite number", check_id, key)
            }
            ConfigIssue::BelowMinimum {
                check_id,
                key,
                value,
                min,
            } => write!(
                f,
                "check '{}': threshold '{}' = {} is below the suggested minimum {}",
                check_id, key, value, min
            ),
            ConfigIssue::Malformed {
                check_id,
                field,
                reason,
            } if field.is_empty() => {
                write!(f, "check '{}': {} (ignored)", check_id, reason)
            }
            ConfigIssue::Malformed {
                check_id,
                field,
                reason,
            } => write!(f, "check '{}': '{}' {} (ignored)", check_id, field, reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checks_config_from_yaml() {
        let yaml = r#"
high_number_species:
  thresholds:
    tooManySpecies: 100
multi_day:
  selected: true
"#;
        let checks: ChecksConfig = serde_yaml::from_str(yaml).unwrap();

        let high = checks.get("high_number_species").unwrap();
        assert_eq!(high.selected, None);
        assert_eq!(high.thresholds.get("tooManySpecies"), Some(&100.0));
        assert_eq!(checks.get("multi_day").unwrap().selected, Some(true));
        assert!(checks.get("midnight").is_none());
    }

    #[test]
    fn malformed_entries_are_dropped_and_recorded() {
        let yaml = r#"
bogus_check: 5
too_fast:
  selected: maybe
  thresholds:
    maxSpeedKmPerHour: fast
ampm:
  thresholds:
    minSpeciesForAmPm: "12"
multi_day:
"#;
        let checks: ChecksConfig = serde_yaml::from_str(yaml).unwrap();

        assert!(checks.get("bogus_check").is_none());
        let too_fast = checks.get("too_fast").unwrap();
        assert_eq!(too_fast.selected, None);
        assert!(too_fast.thresholds.is_empty());
        assert_eq!(
            checks.get("ampm").unwrap().thresholds.get("minSpeciesForAmPm"),
            Some(&12.0)
        );
        assert_eq!(checks.get("multi_day"), Some(&CheckSettings::default()));

        let fields: Vec<(&str, &str)> = checks
            .rejected
            .iter()
            .map(|issue| match issue {
                ConfigIssue::Malformed {
                    check_id, field, ..
                } => (check_id.as_str(), field.as_str()),
                other => panic!("unexpected issue {:?}", other),
            })
            .collect();
        assert_eq!(
            fields,
            vec![
                ("bogus_check", ""),
                ("too_fast", "selected"),
                ("too_fast", "thresholds.maxSpeedKmPerHour"),
            ]
        );
    }

    #[test]
    fn serializes_only_the_accepted_entries() {
        let checks: ChecksConfig =
            serde_yaml::from_str("bogus_check: 5\nampm:\n  selected: false\n").unwrap();
        let yaml = serde_yaml::to_string(&checks).unwrap();
        assert_eq!(yaml, "ampm:\n  selected: false\n");
    }

    #[test]
    fn check_settings_builder() {
        let settings = CheckSettings::selected(false).with_threshold("maxSpeedKmPerHour", 80.0);
        assert_eq!(settings.selected, Some(false));
        assert_eq!(settings.thresholds.get("maxSpeedKmPerHour"), Some(&80.0));
    }

    #[test]
    fn config_issue_display() {
        let issue = ConfigIssue::UnknownThreshold {
            check_id: "too_fast".into(),
            key: "maxSpeed".into(),
        };
        assert_eq!(
            issue.to_string(),
            "check 'too_fast' has no threshold 'maxSpeed' (ignored)"
        );

        let issue = ConfigIssue::Malformed {
            check_id: "bogus_check".into(),
            field: String::new(),
            reason: "expected a mapping with `selected` and/or `thresholds`".into(),
        };
        assert_eq!(
            issue.to_string(),
            "check 'bogus_check': expected a mapping with `selected` and/or `thresholds` (ignored)"
        );
    }
}
