use std::sync::Arc;

use tracing::{debug, info};

use super::domain::{SubmissionRecord, ValidationReportItem};
use super::enrichment::{LandingAssessment, LandingEnricher};
use super::foreign::{classify_foreign_document_batch, ForeignBatchOutcome, ForeignCertificateRow};
use super::licence::LicenceLookup;
use super::risk::{RiskConfig, RiskScoreCalculator, RiskScoreProvider};
use super::rules::ComplianceRuleEngine;

/// Service composing the risk calculator, rule engine and licence enrichment.
pub struct LandingComplianceService<P, L> {
    provider: Arc<P>,
    licences: Arc<L>,
    config: RiskConfig,
}

impl<P, L> LandingComplianceService<P, L>
where
    P: RiskScoreProvider + 'static,
    L: LicenceLookup + 'static,
{
    pub fn new(provider: Arc<P>, licences: Arc<L>, config: RiskConfig) -> Self {
        Self {
            provider,
            licences,
            config,
        }
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    pub fn calculator(&self) -> RiskScoreCalculator<'_, P> {
        RiskScoreCalculator::new(self.provider.as_ref(), &self.config.weights)
    }

    pub fn rule_engine(&self) -> ComplianceRuleEngine<'_, P> {
        ComplianceRuleEngine::new(self.calculator(), &self.config.deminimis)
    }

    /// Build the ordered violation report for a batch of rows.
    pub fn validation_report(&self, records: &[SubmissionRecord]) -> Vec<ValidationReportItem> {
        let items = self.rule_engine().validation_report(records);

        for item in &items {
            debug!(
                species = %item.species,
                vessel = %item.vessel,
                failures = ?item.failures,
                "landing group flagged"
            );
        }
        info!(
            records = records.len(),
            flagged_groups = items.len(),
            "landing validation report built"
        );

        items
    }

    /// Enrich rows from the licence register and annotate risk and legal-due status.
    pub fn assess(&self, records: &[SubmissionRecord]) -> Vec<LandingAssessment> {
        let enricher = LandingEnricher::new(self.calculator(), self.licences.as_ref());
        let assessments = enricher.enrich_all(records);

        let high_risk = assessments
            .iter()
            .filter(|assessment| assessment.is_high_risk)
            .count();
        info!(
            records = records.len(),
            high_risk, "landing assessments built"
        );

        assessments
    }

    /// Enrich rows first, then report on the enriched rows.
    pub fn assessed_report(&self, records: &[SubmissionRecord]) -> Vec<ValidationReportItem> {
        let enriched: Vec<SubmissionRecord> = self
            .assess(records)
            .into_iter()
            .map(|assessment| assessment.record)
            .collect();
        self.validation_report(&enriched)
    }

    pub fn classify_foreign(&self, rows: &mut [ForeignCertificateRow]) -> ForeignBatchOutcome {
        let outcome = classify_foreign_document_batch(rows);
        info!(
            rows = rows.len(),
            valid = outcome.is_valid(),
            "foreign document batch classified"
        );
        outcome
    }
}
