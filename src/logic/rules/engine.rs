use super::{
    ampm::AmPmRule, complete_media::CompleteMediaRule, high_number_species::HighNumberSpeciesRule,
    midnight::MidnightRule, multi_day::MultiDayRule, no_observer_mismatch::NoObserverMismatchRule,
    not_stationary::NotStationaryRule, not_traveling::NotTravelingRule,
    only_one_species::OnlyOneSpeciesRule, pelagic_too_long::PelagicTooLongRule,
    same_count_all_species::SameCountAllSpeciesRule,
    specialized_protocol::SpecializedProtocolRule, too_fast::TooFastRule,
    too_short_duration::TooShortDurationRule, Rule, Thresholds,
};
use crate::models::{
    ChecklistRecord, ChecklistReview, ChecksConfig, ConfigIssue, Finding, RuleFault,
};
use rayon::prelude::*;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Result of running one check against one checklist.
enum RuleOutcome {
    Triggered(Finding),
    Clear,
    Fault(String),
}

/// The ordered check registry. Built once, read-only afterwards.
pub struct RulesEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl RulesEngine {
    pub fn new() -> Self {
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(HighNumberSpeciesRule),
            Box::new(TooShortDurationRule),
            Box::new(NotStationaryRule),
            Box::new(TooFastRule),
            Box::new(SameCountAllSpeciesRule),
            Box::new(OnlyOneSpeciesRule),
            Box::new(CompleteMediaRule),
            Box::new(MidnightRule),
            Box::new(AmPmRule),
            Box::new(MultiDayRule),
            Box::new(NotTravelingRule),
            Box::new(SpecializedProtocolRule),
            Box::new(NoObserverMismatchRule),
            Box::new(PelagicTooLongRule),
        ];

        Self::with_rules(rules)
    }

    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        debug_assert!(
            rules
                .iter()
                .enumerate()
                .all(|(i, r)| rules[..i].iter().all(|other| other.id() != r.id())),
            "rule ids must be unique"
        );
        debug_assert!(
            rules.iter().all(|r| {
                let specs = r.thresholds();
                specs
                    .iter()
                    .enumerate()
                    .all(|(i, s)| specs[..i].iter().all(|other| other.key != s.key))
            }),
            "threshold keys must be unique per rule"
        );

        Self { rules }
    }

    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> + '_ {
        self.rules.iter().map(|r| &**r as &dyn Rule)
    }

    pub fn rule(&self, rule_id: &str) -> Option<&dyn Rule> {
        self.rules().find(|r| r.id() == rule_id)
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.label())).collect()
    }

    pub fn is_selected(&self, rule: &dyn Rule, checks: &ChecksConfig) -> bool {
        checks
            .get(rule.id())
            .and_then(|s| s.selected)
            .unwrap_or_else(|| rule.selected_by_default())
    }

    pub fn thresholds_for(&self, rule: &dyn Rule, checks: &ChecksConfig) -> Thresholds {
        Thresholds::resolve(rule.thresholds(), checks.get(rule.id()))
    }

    /// Runs every selected check, in registry order, against one checklist.
    ///
    /// A check that panics is recorded as a fault and treated as not triggered;
    /// the remaining checks still run.
    pub fn evaluate(&self, checklist: &ChecklistRecord, checks: &ChecksConfig) -> ChecklistReview {
        let mut review = ChecklistReview::new(checklist.checklist_id.clone());

        for rule in self.rules() {
            if !self.is_selected(rule, checks) {
                continue;
            }

            let thresholds = self.thresholds_for(rule, checks);
            match run_rule(rule, checklist, &thresholds) {
                RuleOutcome::Triggered(finding) => {
                    tracing::trace!("{} triggered {}", checklist.display_id(), rule.id());
                    review.findings.push(finding);
                }
                RuleOutcome::Clear => {}
                RuleOutcome::Fault(reason) => {
                    tracing::warn!(
                        "Check {} failed on {}: {}",
                        rule.id(),
                        checklist.display_id(),
                        reason
                    );
                    review.faults.push(RuleFault {
                        checklist_id: checklist.checklist_id.clone(),
                        rule_id: rule.id().to_string(),
                        reason,
                    });
                }
            }
        }

        review
    }

    /// Runs a single check regardless of its selection flag.
    ///
    /// A fault is logged and reads as no finding. Use `evaluate` to get
    /// faults recorded on the review.
    pub fn evaluate_rule(
        &self,
        rule_id: &str,
        checklist: &ChecklistRecord,
        checks: &ChecksConfig,
    ) -> Option<Finding> {
        let rule = self.rule(rule_id)?;
        match run_rule(rule, checklist, &self.thresholds_for(rule, checks)) {
            RuleOutcome::Triggered(finding) => Some(finding),
            RuleOutcome::Clear => None,
            RuleOutcome::Fault(reason) => {
                tracing::warn!(
                    "Check {} failed on {}: {}",
                    rule_id,
                    checklist.display_id(),
                    reason
                );
                None
            }
        }
    }

    /// Evaluates checklists in parallel. Output order matches input order.
    pub fn evaluate_batch(
        &self,
        checklists: &[ChecklistRecord],
        checks: &ChecksConfig,
    ) -> Vec<ChecklistReview> {
        let reviews: Vec<ChecklistReview> = checklists
            .par_iter()
            .map(|checklist| self.evaluate(checklist, checks))
            .collect();

        tracing::info!(
            "Reviewed {} checklists: {} flagged, {} check faults",
            reviews.len(),
            reviews.iter().filter(|r| r.is_flagged()).count(),
            reviews.iter().map(|r| r.faults.len()).sum::<usize>()
        );

        reviews
    }

    /// Reports overlay entries the engine will ignore or that look wrong,
    /// starting with the entries dropped while the overlay was parsed.
    pub fn validate(&self, checks: &ChecksConfig) -> Vec<ConfigIssue> {
        let mut issues = checks.rejected.clone();

        for (check_id, settings) in &checks.checks {
            let Some(rule) = self.rule(check_id) else {
                issues.push(ConfigIssue::UnknownCheck {
                    check_id: check_id.clone(),
                });
                continue;
            };

            for (key, value) in &settings.thresholds {
                let spec = rule.thresholds().iter().find(|s| s.key == key.as_str());
                let Some(spec) = spec else {
                    issues.push(ConfigIssue::UnknownThreshold {
                        check_id: check_id.clone(),
                        key: key.clone(),
                    });
                    continue;
                };

                if !value.is_finite() {
                    issues.push(ConfigIssue::NotFinite {
                        check_id: check_id.clone(),
                        key: key.clone(),
                    });
                } else if let Some(min) = spec.min.filter(|min| value < min) {
                    issues.push(ConfigIssue::BelowMinimum {
                        check_id: check_id.clone(),
                        key: key.clone(),
                        value: *value,
                        min,
                    });
                }
            }
        }

        issues
    }
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn run_rule(rule: &dyn Rule, checklist: &ChecklistRecord, thresholds: &Thresholds) -> RuleOutcome {
    let result = catch_unwind(AssertUnwindSafe(|| {
        if rule.check(checklist, thresholds) {
            Some(rule.message(checklist, thresholds))
        } else {
            None
        }
    }));

    match result {
        Ok(Some(message)) => {
            RuleOutcome::Triggered(Finding::new(rule.id(), rule.label(), message))
        }
        Ok(None) => RuleOutcome::Clear,
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "check panicked".to_string());
            RuleOutcome::Fault(reason)
        }
    }
}
