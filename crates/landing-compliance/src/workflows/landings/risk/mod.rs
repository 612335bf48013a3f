mod provider;
mod weights;

pub use provider::{RiskScoreProvider, RiskScoreTable};
pub use weights::{RiskConfig, RiskDimension, RiskWeights};

use super::domain::SubmissionRecord;

/// Base score substituted when the reference data has nothing usable for a key.
pub const NEUTRAL_BASE_SCORE: f64 = 1.0;

pub fn dimension_score(base_score: f64, weight: f64) -> f64 {
    base_score * weight
}

/// Stateless calculator combining provider base scores with the configured weights.
pub struct RiskScoreCalculator<'a, P: ?Sized> {
    provider: &'a P,
    weights: &'a RiskWeights,
}

impl<'a, P> RiskScoreCalculator<'a, P>
where
    P: RiskScoreProvider + ?Sized,
{
    pub fn new(provider: &'a P, weights: &'a RiskWeights) -> Self {
        Self { provider, weights }
    }

    pub fn weights(&self) -> &RiskWeights {
        self.weights
    }

    pub fn vessel_risk(&self, pln: Option<&str>) -> f64 {
        let base = pln.and_then(|pln| self.provider.vessel_risk_score(pln));
        self.weighted(base, RiskDimension::Vessel)
    }

    pub fn species_risk(&self, species_code: Option<&str>) -> f64 {
        let base = species_code.and_then(|code| self.provider.species_risk_score(code));
        self.weighted(base, RiskDimension::Species)
    }

    pub fn exporter_risk(&self, account_id: Option<&str>, contact_id: Option<&str>) -> f64 {
        let base = if account_id.is_none() && contact_id.is_none() {
            None
        } else {
            self.provider.exporter_risk_score(account_id, contact_id)
        };
        self.weighted(base, RiskDimension::Exporter)
    }

    /// Product of the three dimension scores; one zero dimension zeroes the total.
    pub fn total_risk(
        &self,
        pln: Option<&str>,
        species_code: Option<&str>,
        account_id: Option<&str>,
        contact_id: Option<&str>,
    ) -> f64 {
        self.vessel_risk(pln)
            * self.species_risk(species_code)
            * self.exporter_risk(account_id, contact_id)
    }

    pub fn record_risk(&self, record: &SubmissionRecord) -> f64 {
        self.total_risk(
            record.pln.as_deref(),
            record.species_code.as_deref(),
            record.exporter_account_id.as_deref(),
            record.exporter_contact_id.as_deref(),
        )
    }

    /// Strictly above the threshold; a score equal to it is low risk.
    pub fn is_high_risk(&self, total_risk_score: f64) -> bool {
        total_risk_score > self.weights.threshold
    }

    pub fn is_risk_enabled(&self) -> bool {
        self.weights.species_risk_enabled
    }

    fn weighted(&self, base: Option<f64>, dimension: RiskDimension) -> f64 {
        let base = base
            .filter(|score| score.is_finite())
            .unwrap_or(NEUTRAL_BASE_SCORE);
        dimension_score(base, self.weights.weighting(dimension))
    }
}
