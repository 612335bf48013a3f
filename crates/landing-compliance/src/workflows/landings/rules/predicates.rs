use std::collections::BTreeSet;

use super::super::dates::parse_optional_day;
use super::super::deminimis::DeminimisPolicy;
use super::super::domain::{SubmissionRecord, ValidationRule};
use super::super::risk::{RiskScoreCalculator, RiskScoreProvider};

/// Rules a single record trips, ordered by precedence.
pub type RuleHits = BTreeSet<ValidationRule>;

pub(crate) struct RulePredicates<'a, P: ?Sized> {
    risk: RiskScoreCalculator<'a, P>,
    deminimis: &'a DeminimisPolicy,
}

impl<'a, P> RulePredicates<'a, P>
where
    P: RiskScoreProvider + ?Sized,
{
    pub(crate) fn new(risk: RiskScoreCalculator<'a, P>, deminimis: &'a DeminimisPolicy) -> Self {
        Self { risk, deminimis }
    }

    pub(crate) fn evaluate(&self, record: &SubmissionRecord) -> RuleHits {
        let high_risk = self.risk.is_high_risk(self.risk.record_risk(record));
        let mut hits = RuleHits::new();

        if record.landing_exists {
            if self.species_mismatch_high_risk(record, high_risk) && !self.deminimis.exempts(record)
            {
                hits.insert(ValidationRule::ThreeC);
            }
            if record.overused_this_cert && high_risk {
                hits.insert(ValidationRule::ThreeD);
            }
            if record.overused_all_certs {
                hits.insert(ValidationRule::FourA);
            }
        } else if high_risk && landing_data_outstanding(record) {
            hits.insert(ValidationRule::NoData);
        }

        if !record.has_licence_holder() {
            hits.insert(ValidationRule::NoLicenceHolder);
        }

        hits
    }

    /// With the species toggle off the mismatch alone is enough.
    fn species_mismatch_high_risk(&self, record: &SubmissionRecord, high_risk: bool) -> bool {
        if self.risk.is_risk_enabled() {
            !record.species_exists && high_risk
        } else {
            !record.species_exists
        }
    }
}

fn landing_data_outstanding(record: &SubmissionRecord) -> bool {
    let expected = record.data_ever_expected != Some(false)
        && application_date_on_or_after_expected_date(record);
    expected || record.vessel_overridden_by_admin.unwrap_or(false)
}

/// Calendar-day `createdAt >= landingDataExpectedDate`.
///
/// Rows with no expected date recorded have been expected since landing.
pub fn application_date_on_or_after_expected_date(record: &SubmissionRecord) -> bool {
    let expected = match record.landing_data_expected_date.as_deref().map(str::trim) {
        None | Some("") => return true,
        Some(raw) => parse_optional_day(Some(raw)),
    };

    match (parse_optional_day(record.created_at.as_deref()), expected) {
        (Some(applied_on), Some(expected_on)) => applied_on >= expected_on,
        _ => false,
    }
}
