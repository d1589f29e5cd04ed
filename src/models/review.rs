use serde::{Deserialize, Serialize};

/// One triggered check with its outreach text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub rule_id: String,
    pub label: String,
    pub message: String,
}

impl Finding {
    pub fn new(
        rule_id: impl Into<String>,
        label: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            label: label.into(),
            message: message.into(),
        }
    }
}

/// A check that failed to run against one checklist. The check counts as not triggered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleFault {
    pub checklist_id: Option<String>,
    pub rule_id: String,
    pub reason: String,
}

impl std::fmt::Display for RuleFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} / {}: {}",
            self.checklist_id.as_deref().unwrap_or("(unknown checklist)"),
            self.rule_id,
            self.reason
        )
    }
}

/// Outcome of running every selected check against one checklist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChecklistReview {
    pub checklist_id: Option<String>,
    pub findings: Vec<Finding>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub faults: Vec<RuleFault>,
}

impl ChecklistReview {
    pub fn new(checklist_id: Option<String>) -> Self {
        Self {
            checklist_id,
            findings: Vec::new(),
            faults: Vec::new(),
        }
    }

    pub fn is_flagged(&self) -> bool {
        !self.findings.is_empty()
    }

    pub fn triggered_ids(&self) -> Vec<&str> {
        self.findings.iter().map(|f| f.rule_id.as_str()).collect()
    }

    pub fn has_finding(&self, rule_id: &str) -> bool {
        self.findings.iter().any(|f| f.rule_id == rule_id)
    }

    pub fn finding(&self, rule_id: &str) -> Option<&Finding> {
        self.findings.iter().find(|f| f.rule_id == rule_id)
    }
}
