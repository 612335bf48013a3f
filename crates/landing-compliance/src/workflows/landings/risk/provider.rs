use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Source of base risk scores, conventionally in `[0, 1]`.
///
/// `None` means the reference data holds no score for the key.
pub trait RiskScoreProvider: Send + Sync {
    fn vessel_risk_score(&self, pln: &str) -> Option<f64>;
    fn species_risk_score(&self, species_code: &str) -> Option<f64>;
    fn exporter_risk_score(&self, account_id: Option<&str>, contact_id: Option<&str>)
        -> Option<f64>;
}

/// In-memory reference table of base scores, usually loaded from a JSON snapshot.
///
/// Keys are stored trimmed and uppercased however they arrive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RiskScoreTable {
    #[serde(deserialize_with = "normalized_scores")]
    pub vessels: HashMap<String, f64>,
    #[serde(deserialize_with = "normalized_scores")]
    pub species: HashMap<String, f64>,
    #[serde(deserialize_with = "normalized_scores")]
    pub exporter_accounts: HashMap<String, f64>,
    #[serde(deserialize_with = "normalized_scores")]
    pub exporter_contacts: HashMap<String, f64>,
}

impl RiskScoreTable {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn with_vessel(mut self, pln: &str, score: f64) -> Self {
        self.vessels.insert(normalize_key(pln), score);
        self
    }

    pub fn with_species(mut self, species_code: &str, score: f64) -> Self {
        self.species.insert(normalize_key(species_code), score);
        self
    }

    pub fn with_exporter_account(mut self, account_id: &str, score: f64) -> Self {
        self.exporter_accounts
            .insert(normalize_key(account_id), score);
        self
    }

    pub fn with_exporter_contact(mut self, contact_id: &str, score: f64) -> Self {
        self.exporter_contacts
            .insert(normalize_key(contact_id), score);
        self
    }

    fn lookup(table: &HashMap<String, f64>, key: &str) -> Option<f64> {
        table.get(&normalize_key(key)).copied()
    }
}

impl RiskScoreProvider for RiskScoreTable {
    fn vessel_risk_score(&self, pln: &str) -> Option<f64> {
        Self::lookup(&self.vessels, pln)
    }

    fn species_risk_score(&self, species_code: &str) -> Option<f64> {
        Self::lookup(&self.species, species_code)
    }

    /// Account scores take precedence; contact scores cover exporters without an account.
    fn exporter_risk_score(
        &self,
        account_id: Option<&str>,
        contact_id: Option<&str>,
    ) -> Option<f64> {
        account_id
            .and_then(|id| Self::lookup(&self.exporter_accounts, id))
            .or_else(|| contact_id.and_then(|id| Self::lookup(&self.exporter_contacts, id)))
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_uppercase()
}

fn normalized_scores<'de, D>(deserializer: D) -> Result<HashMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = HashMap::<String, f64>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(key, score)| (normalize_key(&key), score))
        .collect())
}
