mod grouping;
mod predicates;

pub use predicates::{application_date_on_or_after_expected_date, RuleHits};

use super::deminimis::DeminimisPolicy;
use super::domain::{SubmissionRecord, ValidationReportItem};
use super::risk::{RiskScoreCalculator, RiskScoreProvider};
use grouping::GroupIndex;
use predicates::RulePredicates;

/// Reduces per-submission rows into one violation report per failing reporting unit.
///
/// Output order follows the first failing row of each unit in the input sequence. Rule
/// lists are deduplicated and always in `ValidationRule` precedence order.
pub struct ComplianceRuleEngine<'a, P: ?Sized> {
    predicates: RulePredicates<'a, P>,
}

impl<'a, P> ComplianceRuleEngine<'a, P>
where
    P: RiskScoreProvider + ?Sized,
{
    pub fn new(risk: RiskScoreCalculator<'a, P>, deminimis: &'a DeminimisPolicy) -> Self {
        Self {
            predicates: RulePredicates::new(risk, deminimis),
        }
    }

    pub fn rule_hits(&self, record: &SubmissionRecord) -> RuleHits {
        self.predicates.evaluate(record)
    }

    pub fn is_failed_cert(&self, record: &SubmissionRecord) -> bool {
        !self.rule_hits(record).is_empty()
    }

    pub fn candidates<'r>(&self, records: &'r [SubmissionRecord]) -> Vec<&'r SubmissionRecord> {
        records
            .iter()
            .filter(|record| self.is_failed_cert(record))
            .collect()
    }

    pub fn validation_report(&self, records: &[SubmissionRecord]) -> Vec<ValidationReportItem> {
        let mut index = GroupIndex::default();

        for record in records {
            let hits = self.predicates.evaluate(record);
            if hits.is_empty() {
                continue;
            }
            index.record(record.group_key(), hits);
        }

        index.into_items()
    }
}
