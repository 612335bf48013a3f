use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::DevolvedAuthority;

/// Licence details held for a vessel over a validity window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VesselLicence {
    pub pln: String,
    pub vessel_name: String,
    pub licence_holder: Option<String>,
    pub vessel_length: Option<f64>,
    pub da: Option<DevolvedAuthority>,
    pub valid_from: NaiveDate,
    #[serde(default)]
    pub valid_to: Option<NaiveDate>,
}

impl VesselLicence {
    pub fn is_valid_on(&self, day: NaiveDate) -> bool {
        self.valid_from <= day && self.valid_to.map(|end| day <= end).unwrap_or(true)
    }
}

/// Vessel-licence reference data keyed by PLN and landing day.
pub trait LicenceLookup: Send + Sync {
    fn lookup_licence(&self, pln: &str, landed_on: NaiveDate) -> Option<VesselLicence>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LicenceRegistry {
    licences: Vec<VesselLicence>,
}

impl LicenceRegistry {
    pub fn new(licences: Vec<VesselLicence>) -> Self {
        Self { licences }
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn len(&self) -> usize {
        self.licences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.licences.is_empty()
    }
}

impl LicenceLookup for LicenceRegistry {
    /// Latest-starting licence valid on the day wins when windows overlap.
    fn lookup_licence(&self, pln: &str, landed_on: NaiveDate) -> Option<VesselLicence> {
        let pln = pln.trim();
        self.licences
            .iter()
            .filter(|licence| licence.pln.trim().eq_ignore_ascii_case(pln))
            .filter(|licence| licence.is_valid_on(landed_on))
            .max_by_key(|licence| licence.valid_from)
            .cloned()
    }
}
