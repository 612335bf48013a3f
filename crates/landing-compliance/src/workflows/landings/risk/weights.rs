use serde::{Deserialize, Serialize};

use super::super::deminimis::DeminimisPolicy;

/// Risk dimension a weighting applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskDimension {
    Vessel,
    Species,
    Exporter,
}

/// Weighting configuration backing the composite risk score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskWeights {
    pub vessel: f64,
    pub species: f64,
    pub exporter: f64,
    pub threshold: f64,
    /// Gates the high-risk requirement of the species mismatch rule only.
    pub species_risk_enabled: bool,
}

impl RiskWeights {
    pub fn weighting(&self, dimension: RiskDimension) -> f64 {
        match dimension {
            RiskDimension::Vessel => self.vessel,
            RiskDimension::Species => self.species,
            RiskDimension::Exporter => self.exporter,
        }
    }
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            vessel: 1.0,
            species: 1.0,
            exporter: 1.0,
            threshold: 1.0,
            species_risk_enabled: true,
        }
    }
}

/// Immutable risk settings resolved once at startup and shared by reference.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RiskConfig {
    pub weights: RiskWeights,
    pub deminimis: DeminimisPolicy,
}
