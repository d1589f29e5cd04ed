use crate::error::{Result, ReviewError};
use crate::models::ChecklistRecord;
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Yaml,
}

impl InputFormat {
    /// `.yaml`/`.yml` files are YAML; everything else is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => InputFormat::Yaml,
            _ => InputFormat::Json,
        }
    }
}

pub fn load_checklists(path: &Path) -> Result<Vec<ChecklistRecord>> {
    let content = std::fs::read_to_string(path)?;
    let checklists = parse_checklists(&content, InputFormat::from_path(path))?;
    tracing::debug!("Loaded {} checklists from {}", checklists.len(), path.display());
    Ok(checklists)
}

/// Parses an exported table of checklists: a top-level array of rows, or an
/// object with a `checklists` array. Row fields are read leniently.
pub fn parse_checklists(content: &str, format: InputFormat) -> Result<Vec<ChecklistRecord>> {
    let document: Value = match format {
        InputFormat::Json => serde_json::from_str(content)?,
        InputFormat::Yaml => serde_yaml::from_str(content)?,
    };

    let rows = match document {
        Value::Array(rows) => rows,
        Value::Object(mut obj) => match obj.remove("checklists") {
            Some(Value::Array(rows)) => rows,
            _ => {
                return Err(ReviewError::InvalidData(
                    "expected an array of checklists or a `checklists` array".into(),
                ))
            }
        },
        Value::Null => Vec::new(),
        _ => {
            return Err(ReviewError::InvalidData(
                "expected an array of checklists".into(),
            ))
        }
    };

    // Rows go through `ChecklistRecord`'s lenient `Deserialize`; it never rejects a row
    let checklists: Vec<ChecklistRecord> = serde_json::from_value(Value::Array(rows))?;

    let malformed = checklists
        .iter()
        .filter(|c| !c.malformed_fields.is_empty())
        .count();
    if malformed > 0 {
        tracing::warn!(
            "{} of {} checklists had malformed fields; those fields were ignored",
            malformed,
            checklists.len()
        );
    }

    Ok(checklists)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn format_from_extension() {
        assert_eq!(InputFormat::from_path(Path::new("a.yaml")), InputFormat::Yaml);
        assert_eq!(InputFormat::from_path(Path::new("a.YML")), InputFormat::Yaml);
        assert_eq!(InputFormat::from_path(Path::new("a.json")), InputFormat::Json);
        assert_eq!(InputFormat::from_path(Path::new("export")), InputFormat::Json);
    }

    #[test]
    fn parse_json_array() {
        let json = r#"[
            {"checklist_id": "S1", "number_species": 75},
            {"checklist_id": "S2", "number_species": "oops"}
        ]"#;
        let checklists = parse_checklists(json, InputFormat::Json).unwrap();
        assert_eq!(checklists.len(), 2);
        assert_eq!(checklists[0].number_species, Some(75));
        assert_eq!(checklists[1].number_species, None);
        assert_eq!(checklists[1].malformed_fields, vec!["number_species"]);
    }

    #[test]
    fn non_object_rows_are_kept_as_empty_records() {
        let json = r#"[{"checklist_id": "S1"}, 7, null]"#;
        let checklists = parse_checklists(json, InputFormat::Json).unwrap();
        assert_eq!(checklists.len(), 3);
        assert_eq!(checklists[0].checklist_id.as_deref(), Some("S1"));
        assert_eq!(checklists[1].malformed_fields, vec!["<record>"]);
        assert_eq!(checklists[2].malformed_fields, vec!["<record>"]);
    }

    #[test]
    fn parse_wrapped_object() {
        let json = r#"{"checklists": [{"checklist_id": "S1"}]}"#;
        let checklists = parse_checklists(json, InputFormat::Json).unwrap();
        assert_eq!(checklists[0].checklist_id.as_deref(), Some("S1"));
    }

    #[test]
    fn parse_yaml_sequence() {
        let yaml = r#"
- checklist_id: S10
  protocol_name: Traveling
  effort_distance_km: 10
  duration_minutes: 5
  time_observations_started: "07:15:00"
"#;
        let checklists = parse_checklists(yaml, InputFormat::Yaml).unwrap();
        assert_eq!(checklists.len(), 1);
        assert_eq!(checklists[0].speed_kmh(), Some(120.0));
        assert_eq!(checklists[0].start_seconds(), Some(26_100));
    }

    #[test]
    fn rejects_non_tabular_documents() {
        assert!(matches!(
            parse_checklists("42", InputFormat::Json),
            Err(ReviewError::InvalidData(_))
        ));
        assert!(matches!(
            parse_checklists(r#"{"rows": []}"#, InputFormat::Json),
            Err(ReviewError::InvalidData(_))
        ));
        assert!(matches!(
            parse_checklists("[1, 2", InputFormat::Json),
            Err(ReviewError::Json(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"[{{"checklist_id": "S5", "nocturnal": true}}]"#).unwrap();

        let checklists = load_checklists(file.path()).unwrap();
        assert_eq!(checklists.len(), 1);
        assert!(checklists[0].is_nocturnal());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let result = load_checklists(Path::new("/nonexistent/checklists.json"));
        assert!(matches!(result, Err(ReviewError::Io(_))));
    }
}
