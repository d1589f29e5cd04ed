use super::{Rule, Thresholds};
use crate::models::ChecklistRecord;

/// Complete daytime checklists where every species has media attached.
///
/// Usually means only the photographed birds were entered.
pub struct CompleteMediaRule;

impl Rule for CompleteMediaRule {
    fn id(&self) -> &'static str {
        "complete_media"
    }

    fn label(&self) -> &'static str {
        "Media for every species"
    }

    fn description(&self) -> &'static str {
        "Identifies complete checklists where every single species has associated media, which \
         is unusually comprehensive and may indicate incomplete species reporting."
    }

    fn check(&self, checklist: &ChecklistRecord, _thresholds: &Thresholds) -> bool {
        if checklist.is_nocturnal() || !checklist.is_complete() {
            return false;
        }
        match (checklist.number_media, checklist.number_species) {
            (Some(media), Some(species)) => media == species,
            _ => false,
        }
    }

    fn message(&self, _checklist: &ChecklistRecord, _thresholds: &Thresholds) -> String {
        "Your checklist is marked as complete and has media for every species. Please confirm \
         that you indeed reported all species present, not only those with media. Otherwise, \
         please change the checklist to \"Incomplete\"."
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_media_when_counts_match() {
        let rule = CompleteMediaRule;
        let t = Thresholds::default();
        let mut record = ChecklistRecord {
            all_species_reported: Some(true),
            nocturnal: Some(false),
            number_species: Some(4),
            number_media: Some(4),
            ..Default::default()
        };
        assert!(rule.check(&record, &t));

        // unknown nocturnal flag counts as daytime
        record.nocturnal = None;
        assert!(rule.check(&record, &t));

        record.number_media = Some(3);
        assert!(!rule.check(&record, &t));

        record.number_media = None;
        record.number_species = None;
        assert!(!rule.check(&record, &t));
    }

    #[test]
    fn complete_media_skips_incomplete_and_night_lists() {
        let rule = CompleteMediaRule;
        let t = Thresholds::default();
        let mut record = ChecklistRecord {
            all_species_reported: Some(false),
            number_species: Some(2),
            number_media: Some(2),
            ..Default::default()
        };
        assert!(!rule.check(&record, &t));

        record.all_species_reported = Some(true);
        record.nocturnal = Some(true);
        assert!(!rule.check(&record, &t));
    }
}
