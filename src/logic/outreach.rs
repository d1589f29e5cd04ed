use crate::config::OutreachConfig;
use crate::models::{ChecklistRecord, ChecklistReview};
use serde::Serialize;

/// One outreach email for a flagged checklist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutreachEmail {
    pub checklist_id: Option<String>,
    pub to: Option<String>,
    pub subject: String,
    pub body: String,
}

impl std::fmt::Display for OutreachEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(to) = &self.to {
            writeln!(f, "To: {}", to)?;
        }
        writeln!(f, "Subject: {}", self.subject)?;
        writeln!(f)?;
        write!(f, "{}", self.body)
    }
}

pub fn checklist_url(config: &OutreachConfig, checklist_id: &str) -> String {
    format!("{}/{}", config.checklist_url_base.trim_end_matches('/'), checklist_id)
}

/// Builds the outreach email for a reviewed checklist.
///
/// Returns `None` when nothing was flagged. Findings appear in the order the
/// engine produced them, one paragraph each.
pub fn compose_email(
    review: &ChecklistReview,
    checklist: &ChecklistRecord,
    config: &OutreachConfig,
) -> Option<OutreachEmail> {
    if !review.is_flagged() {
        return None;
    }

    let name = checklist
        .observer_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(config.fallback_name.as_str());

    let subject = match &review.checklist_id {
        Some(id) => format!("{} {}", config.subject_prefix, id),
        None => config.subject_prefix.clone(),
    };

    let mut body = format!("{} {},\n\n{}\n", config.greeting, name, config.intro);

    if let Some(id) = &review.checklist_id {
        body.push_str(&format!("\nChecklist: {}", checklist_url(config, id)));
        if let Some(date) = checklist.observation_date {
            body.push_str(&format!(" ({})", date.format("%Y-%m-%d")));
        }
        body.push('\n');
    }

    for finding in &review.findings {
        body.push('\n');
        body.push_str(&finding.message);
        body.push('\n');
    }

    body.push('\n');
    body.push_str(&config.signature);
    body.push('\n');

    Some(OutreachEmail {
        checklist_id: review.checklist_id.clone(),
        to: checklist.observer_email.clone(),
        subject,
        body,
    })
}

/// Composes emails for every flagged checklist; `reviews` and `checklists` are paired by index.
pub fn compose_all(
    reviews: &[ChecklistReview],
    checklists: &[ChecklistRecord],
    config: &OutreachConfig,
) -> Vec<OutreachEmail> {
    reviews
        .iter()
        .zip(checklists)
        .filter_map(|(review, checklist)| compose_email(review, checklist, config))
        .collect()
}
