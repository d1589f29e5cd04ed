use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Map, Value};

const SECONDS_PER_DAY: u32 = 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Stationary,
    Traveling,
    Incidental,
    Historical,
    Pelagic,
    Other,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Stationary => "Stationary",
            Protocol::Traveling => "Traveling",
            Protocol::Incidental => "Incidental",
            Protocol::Historical => "Historical",
            Protocol::Pelagic => "eBird Pelagic Protocol",
            Protocol::Other => "Other",
        }
    }

    /// Exact, case-sensitive match against eBird's protocol names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Stationary" => Protocol::Stationary,
            "Traveling" => Protocol::Traveling,
            "Incidental" => Protocol::Incidental,
            "Historical" => Protocol::Historical,
            "eBird Pelagic Protocol" => Protocol::Pelagic,
            _ => Protocol::Other,
        }
    }

    pub fn is_standard(&self) -> bool {
        matches!(
            self,
            Protocol::Stationary | Protocol::Traveling | Protocol::Incidental | Protocol::Historical
        )
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Observation start time as submitted, parsed once into seconds since midnight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTime {
    pub raw: String,
    /// `None` when `raw` is not a valid `H:MM`, `HH:MM` or `HH:MM:SS` time.
    pub seconds: Option<u32>,
}

impl StartTime {
    pub fn parse(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            seconds: parse_seconds(raw.trim()),
        }
    }

    pub fn is_exact_midnight(&self) -> bool {
        matches!(self.raw.as_str(), "00:00:00" | "00:00" | "0:00:00")
    }

    /// `HH:MM` for display; falls back to the raw text when it did not parse.
    pub fn hh_mm(&self) -> String {
        match self.seconds {
            Some(s) => format!("{:02}:{:02}", s / 3600, (s % 3600) / 60),
            None => self.raw.chars().take(5).collect(),
        }
    }
}

fn parse_seconds(text: &str) -> Option<u32> {
    let parts: Vec<&str> = text.split(':').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return None;
    }

    let mut fields = [0u32; 3];
    for (slot, part) in fields.iter_mut().zip(&parts) {
        if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *slot = part.parse().ok()?;
    }

    let [hours, minutes, seconds] = fields;
    if hours > 23 || minutes > 59 || seconds > 59 {
        return None;
    }

    let total = hours * 3600 + minutes * 60 + seconds;
    debug_assert!(total < SECONDS_PER_DAY);
    Some(total)
}

/// One submitted eBird checklist, as consumed by the rules engine.
///
/// Every attribute is optional. Import is lenient: a value of the wrong shape
/// becomes `None` and its column name is recorded in `malformed_fields`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct ChecklistRecord {
    pub checklist_id: Option<String>,
    pub observer_name: Option<String>,
    pub observer_email: Option<String>,
    pub observation_date: Option<NaiveDate>,
    pub number_species: Option<u32>,
    pub duration_minutes: Option<f64>,
    pub all_species_reported: Option<bool>,
    pub protocol_name: Option<String>,
    pub effort_distance_km: Option<f64>,
    pub median_count: Option<f64>,
    pub number_unique_count: Option<u32>,
    pub nocturnal: Option<bool>,
    pub number_media: Option<u32>,
    pub start_time: Option<StartTime>,
    pub number_observers: Option<u32>,
    pub no_checklists: Option<u32>,
    pub malformed_fields: Vec<String>,
}

impl ChecklistRecord {
    pub fn with_start_time(mut self, raw: &str) -> Self {
        self.start_time = Some(StartTime::parse(raw));
        self
    }

    pub fn display_id(&self) -> &str {
        self.checklist_id.as_deref().unwrap_or("(unknown checklist)")
    }

    /// "Complete" checklist flag; unknown counts as incomplete.
    pub fn is_complete(&self) -> bool {
        self.all_species_reported.unwrap_or(false)
    }

    pub fn is_nocturnal(&self) -> bool {
        self.nocturnal.unwrap_or(false)
    }

    pub fn protocol(&self) -> Option<Protocol> {
        self.protocol_name.as_deref().map(Protocol::from_name)
    }

    /// Travel speed in km/h. `None` unless the duration is positive.
    pub fn speed_kmh(&self) -> Option<f64> {
        let duration = self.duration_minutes.filter(|d| *d > 0.0)?;
        let distance = self.effort_distance_km?;
        Some(distance / duration * 60.0)
    }

    pub fn start_seconds(&self) -> Option<u32> {
        self.start_time.as_ref().and_then(|t| t.seconds)
    }
}

impl From<Value> for ChecklistRecord {
    fn from(value: Value) -> Self {
        let Value::Object(obj) = value else {
            return Self {
                malformed_fields: vec!["<record>".to_string()],
                ..Default::default()
            };
        };

        let mut fields = FieldReader::new(&obj);
        let record = Self {
            checklist_id: fields.text(&[
                "checklist_id",
                "checklistId",
                "sampling_event_identifier",
                "submission_id",
            ]),
            observer_name: fields.text(&["observer_name", "observerName", "name"]),
            observer_email: fields.text(&["observer_email", "observerEmail", "email"]),
            observation_date: fields.date(&["observation_date", "observationDate", "date"]),
            number_species: fields.count(&["number_species", "numberSpecies"]),
            duration_minutes: fields.number(&["duration_minutes", "durationMinutes"]),
            all_species_reported: fields.flag(&["all_species_reported", "allSpeciesReported"]),
            protocol_name: fields.text(&["protocol_name", "protocolName", "protocol"]),
            effort_distance_km: fields.number(&["effort_distance_km", "effortDistanceKm"]),
            median_count: fields.number(&["median_count", "medianCount"]),
            number_unique_count: fields.count(&["number_unique_count", "numberUniqueCount"]),
            nocturnal: fields.flag(&["nocturnal"]),
            number_media: fields.count(&["number_media", "numberMedia"]),
            start_time: fields
                .text(&[
                    "time_observations_started",
                    "timeObservationsStarted",
                    "time",
                ])
                .map(|raw| StartTime::parse(&raw)),
            number_observers: fields.count(&["number_observers", "numberObservers"]),
            no_checklists: fields.count(&["no_checklists", "noChecklists"]),
            malformed_fields: Vec::new(),
        };

        let malformed_fields = fields.finish();
        if !malformed_fields.is_empty() {
            tracing::debug!(
                "Checklist {}: ignoring malformed fields {:?}",
                record.display_id(),
                malformed_fields
            );
        }

        Self {
            malformed_fields,
            ..record
        }
    }
}

/// Per-field lenient extraction from one imported row.
struct FieldReader<'a> {
    obj: &'a Map<String, Value>,
    malformed: Vec<String>,
}

impl<'a> FieldReader<'a> {
    fn new(obj: &'a Map<String, Value>) -> Self {
        Self {
            obj,
            malformed: Vec::new(),
        }
    }

    fn finish(self) -> Vec<String> {
        self.malformed
    }

    /// First listed column holding a value. Nulls and blank cells count as absent.
    fn lookup(&self, keys: &[&'static str]) -> Option<(&'static str, &'a Value)> {
        keys.iter().find_map(|key| match self.obj.get(*key) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.trim().is_empty() => None,
            Some(v) => Some((*key, v)),
        })
    }

    fn extract<T>(
        &mut self,
        keys: &[&'static str],
        convert: impl FnOnce(&Value) -> Option<T>,
    ) -> Option<T> {
        let (key, value) = self.lookup(keys)?;
        let converted = convert(value);
        if converted.is_none() {
            self.malformed.push(key.to_string());
        }
        converted
    }

    fn text(&mut self, keys: &[&'static str]) -> Option<String> {
        self.extract(keys, |v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    fn number(&mut self, keys: &[&'static str]) -> Option<f64> {
        self.extract(keys, value_as_f64)
    }

    fn count(&mut self, keys: &[&'static str]) -> Option<u32> {
        self.extract(keys, |v| {
            let n = value_as_f64(v)?;
            if n < 0.0 || n.fract() != 0.0 || n > f64::from(u32::MAX) {
                return None;
            }
            Some(n as u32)
        })
    }

    fn flag(&mut self, keys: &[&'static str]) -> Option<bool> {
        self.extract(keys, |v| match v {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => match n.as_f64() {
                Some(x) if x == 1.0 => Some(true),
                Some(x) if x == 0.0 => Some(false),
                _ => None,
            },
            Value::String(s) => {
                let s = s.trim();
                if s.eq_ignore_ascii_case("true") || s == "1" {
                    Some(true)
                } else if s.eq_ignore_ascii_case("false") || s == "0" {
                    Some(false)
                } else {
                    None
                }
            }
            _ => None,
        })
    }

    fn date(&mut self, keys: &[&'static str]) -> Option<NaiveDate> {
        self.extract(keys, |v| {
            v.as_str()
                .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
        })
    }
}

pub(crate) fn value_as_f64(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn protocol_from_name_is_case_sensitive() {
        assert_eq!(Protocol::from_name("Stationary"), Protocol::Stationary);
        assert_eq!(
            Protocol::from_name("eBird Pelagic Protocol"),
            Protocol::Pelagic
        );
        assert_eq!(Protocol::from_name("stationary"), Protocol::Other);
        assert_eq!(Protocol::from_name("Area"), Protocol::Other);
    }

    #[test]
    fn protocol_standard_set() {
        assert!(Protocol::Traveling.is_standard());
        assert!(Protocol::Historical.is_standard());
        assert!(!Protocol::Pelagic.is_standard());
        assert!(!Protocol::Other.is_standard());
    }

    #[test]
    fn start_time_parses_common_forms() {
        assert_eq!(StartTime::parse("07:30").seconds, Some(27_000));
        assert_eq!(StartTime::parse("7:30").seconds, Some(27_000));
        assert_eq!(StartTime::parse("23:59:59").seconds, Some(86_399));
        assert_eq!(StartTime::parse("0:00:00").seconds, Some(0));
    }

    #[test]
    fn start_time_rejects_garbage() {
        assert_eq!(StartTime::parse("noon").seconds, None);
        assert_eq!(StartTime::parse("7").seconds, None);
        assert_eq!(StartTime::parse("25:00").seconds, None);
        assert_eq!(StartTime::parse("10:61").seconds, None);
        assert_eq!(StartTime::parse("1:2:3:4").seconds, None);
        assert_eq!(StartTime::parse("+1:30").seconds, None);
    }

    #[test]
    fn start_time_midnight_is_textual() {
        assert!(StartTime::parse("00:00:00").is_exact_midnight());
        assert!(StartTime::parse("00:00").is_exact_midnight());
        assert!(StartTime::parse("0:00:00").is_exact_midnight());
        assert!(!StartTime::parse("0:00").is_exact_midnight());
        assert!(!StartTime::parse("00:00:01").is_exact_midnight());
    }

    #[test]
    fn start_time_hh_mm() {
        assert_eq!(StartTime::parse("7:05:30").hh_mm(), "07:05");
        assert_eq!(StartTime::parse("21:15").hh_mm(), "21:15");
        assert_eq!(StartTime::parse("late evening").hh_mm(), "late ");
    }

    #[test]
    fn record_from_snake_case_columns() {
        let record = ChecklistRecord::from(json!({
            "checklist_id": "S123456",
            "number_species": 42,
            "duration_minutes": 90.5,
            "all_species_reported": true,
            "protocol_name": "Traveling",
            "effort_distance_km": 3.2,
            "time_observations_started": "06:45:00",
            "observation_date": "2024-05-11",
        }));

        assert_eq!(record.checklist_id.as_deref(), Some("S123456"));
        assert_eq!(record.number_species, Some(42));
        assert_eq!(record.duration_minutes, Some(90.5));
        assert!(record.is_complete());
        assert_eq!(record.protocol(), Some(Protocol::Traveling));
        assert_eq!(record.start_seconds(), Some(24_300));
        assert_eq!(
            record.observation_date,
            NaiveDate::from_ymd_opt(2024, 5, 11)
        );
        assert!(record.malformed_fields.is_empty());
    }

    #[test]
    fn record_from_camel_case_and_string_cells() {
        let record = ChecklistRecord::from(json!({
            "checklistId": "S1",
            "numberSpecies": "12",
            "durationMinutes": "30",
            "allSpeciesReported": "TRUE",
            "nocturnal": 0,
            "time": "5:10",
        }));

        assert_eq!(record.number_species, Some(12));
        assert_eq!(record.duration_minutes, Some(30.0));
        assert_eq!(record.all_species_reported, Some(true));
        assert_eq!(record.nocturnal, Some(false));
        assert_eq!(record.start_seconds(), Some(18_600));
    }

    #[test]
    fn malformed_fields_degrade_to_none() {
        let record = ChecklistRecord::from(json!({
            "number_species": "many",
            "duration_minutes": [1, 2],
            "all_species_reported": "maybe",
            "number_media": -3,
            "number_observers": 2.5,
            "protocol_name": "Stationary",
        }));

        assert_eq!(record.number_species, None);
        assert_eq!(record.duration_minutes, None);
        assert_eq!(record.all_species_reported, None);
        assert_eq!(record.number_media, None);
        assert_eq!(record.number_observers, None);
        assert_eq!(record.protocol_name.as_deref(), Some("Stationary"));
        assert_eq!(
            record.malformed_fields,
            vec![
                "number_species",
                "duration_minutes",
                "all_species_reported",
                "number_media",
                "number_observers",
            ]
        );
    }

    #[test]
    fn blank_and_null_cells_are_absent_not_malformed() {
        let record = ChecklistRecord::from(json!({
            "number_species": "",
            "effort_distance_km": null,
        }));
        assert_eq!(record.number_species, None);
        assert_eq!(record.effort_distance_km, None);
        assert!(record.malformed_fields.is_empty());
    }

    #[test]
    fn non_object_row_is_empty_record() {
        let record = ChecklistRecord::from(json!([1, 2, 3]));
        assert_eq!(record.number_species, None);
        assert_eq!(record.malformed_fields, vec!["<record>"]);
    }

    #[test]
    fn deserializes_leniently_from_json_and_yaml() {
        let record: ChecklistRecord =
            serde_json::from_str(r#"{"checklistId": "S3", "numberSpecies": "many"}"#).unwrap();
        assert_eq!(record.checklist_id.as_deref(), Some("S3"));
        assert_eq!(record.number_species, None);
        assert_eq!(record.malformed_fields, vec!["numberSpecies"]);

        let record: ChecklistRecord =
            serde_yaml::from_str("checklist_id: S4\nduration_minutes: 30\n").unwrap();
        assert_eq!(record.duration_minutes, Some(30.0));
        assert!(record.malformed_fields.is_empty());
    }

    #[test]
    fn speed_requires_positive_duration() {
        let mut record = ChecklistRecord {
            effort_distance_km: Some(10.0),
            duration_minutes: Some(5.0),
            ..Default::default()
        };
        assert_eq!(record.speed_kmh(), Some(120.0));

        record.duration_minutes = Some(0.0);
        assert_eq!(record.speed_kmh(), None);

        record.duration_minutes = Some(-5.0);
        assert_eq!(record.speed_kmh(), None);
    }

    #[test]
    fn missing_flags_are_false() {
        let record = ChecklistRecord::default();
        assert!(!record.is_complete());
        assert!(!record.is_nocturnal());
        assert_eq!(record.display_id(), "(unknown checklist)");
    }
}
