use serde::Serialize;

use super::dates::parse_optional_day;
use super::domain::SubmissionRecord;
use super::legal_due::is_legally_due;
use super::licence::LicenceLookup;
use super::risk::{RiskScoreCalculator, RiskScoreProvider};

/// A record after licence enrichment, annotated with its risk and legal-due status.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LandingAssessment {
    #[serde(flatten)]
    pub record: SubmissionRecord,
    pub total_risk: f64,
    pub is_high_risk: bool,
    /// Absent when vessel length, authority or either date is unknown.
    pub is_legally_due: Option<bool>,
}

pub struct LandingEnricher<'a, P: ?Sized, L: ?Sized> {
    risk: RiskScoreCalculator<'a, P>,
    licences: &'a L,
}

impl<'a, P, L> LandingEnricher<'a, P, L>
where
    P: RiskScoreProvider + ?Sized,
    L: LicenceLookup + ?Sized,
{
    pub fn new(risk: RiskScoreCalculator<'a, P>, licences: &'a L) -> Self {
        Self { risk, licences }
    }

    pub fn enrich_all(&self, records: &[SubmissionRecord]) -> Vec<LandingAssessment> {
        records.iter().map(|record| self.enrich(record)).collect()
    }

    pub fn enrich(&self, record: &SubmissionRecord) -> LandingAssessment {
        let record = self.with_licence(record);
        let total_risk = self.risk.record_risk(&record);
        let is_high_risk = self.risk.is_high_risk(total_risk);
        let is_legally_due = legal_due_for(&record);

        LandingAssessment {
            record,
            total_risk,
            is_high_risk,
            is_legally_due,
        }
    }

    /// Fills blanks from the licence valid on the landing day; supplied values are kept.
    fn with_licence(&self, record: &SubmissionRecord) -> SubmissionRecord {
        let mut enriched = record.clone();

        let licence = match (
            record.pln.as_deref(),
            parse_optional_day(record.date_landed.as_deref()),
        ) {
            (Some(pln), Some(landed_on)) => self.licences.lookup_licence(pln, landed_on),
            _ => None,
        };

        let Some(licence) = licence else {
            return enriched;
        };

        if !enriched.has_licence_holder() {
            enriched.licence_holder = licence.licence_holder;
        }
        if !enriched.has_vessel_name() {
            enriched.vessel_name = Some(licence.vessel_name);
        }
        if enriched.vessel_length.is_none() {
            enriched.vessel_length = licence.vessel_length;
        }
        if enriched.da.is_none() {
            enriched.da = licence.da;
        }

        enriched
    }
}

fn legal_due_for(record: &SubmissionRecord) -> Option<bool> {
    let vessel_length = record.vessel_length?;
    let authority = record.da?;
    let applied_on = parse_optional_day(record.created_at.as_deref())?;
    let landed_on = parse_optional_day(record.date_landed.as_deref())?;

    Some(is_legally_due(
        vessel_length,
        authority,
        applied_on,
        landed_on,
        record.is_quota_species.unwrap_or(false),
        record.weight_on_cert.unwrap_or(0.0),
    ))
}
