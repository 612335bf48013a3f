use serde::{Deserialize, Serialize};

use super::dates::LandingDay;

/// One export-certificate query row: a (certificate, species line, landing) combination.
///
/// Rows arrive already enriched by the certificate pipeline. The rule engine reads them and
/// never mutates them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmissionRecord {
    pub document_number: String,
    /// Date the certificate was applied for.
    pub created_at: Option<String>,
    pub exporter_account_id: Option<String>,
    pub exporter_contact_id: Option<String>,
    pub pln: Option<String>,
    pub vessel_name: Option<String>,
    pub species_code: Option<String>,
    pub presentation: Option<String>,
    pub state: Option<String>,
    pub date_landed: Option<String>,
    pub first_date_time_landing_data_retrieved: Option<String>,
    pub licence_holder: Option<String>,
    /// Live weight declared on the certificate, in kilograms.
    pub weight_on_cert: Option<f64>,
    #[serde(rename = "isLandingExists")]
    pub landing_exists: bool,
    #[serde(rename = "isSpeciesExists")]
    pub species_exists: bool,
    #[serde(rename = "isOverusedThisCert")]
    pub overused_this_cert: bool,
    #[serde(rename = "isOverusedAllCerts")]
    pub overused_all_certs: bool,
    pub data_ever_expected: Option<bool>,
    pub vessel_overridden_by_admin: Option<bool>,
    pub landing_data_expected_date: Option<String>,
    pub landing_data_end_date: Option<String>,
    pub source: Option<String>,
    pub vessel_length: Option<f64>,
    #[serde(deserialize_with = "deserialize_authority")]
    pub da: Option<DevolvedAuthority>,
    pub is_quota_species: Option<bool>,
    pub has_sales_note: Option<bool>,
}

impl SubmissionRecord {
    pub fn has_licence_holder(&self) -> bool {
        self.licence_holder
            .as_deref()
            .map(|holder| !holder.trim().is_empty())
            .unwrap_or(false)
    }

    pub fn has_vessel_name(&self) -> bool {
        self.vessel_name
            .as_deref()
            .map(|name| !name.trim().is_empty())
            .unwrap_or(false)
    }

    pub fn landing_day(&self) -> LandingDay {
        LandingDay::from_raw(self.date_landed.as_deref())
    }

    pub fn group_key(&self) -> GroupKey {
        GroupKey {
            species: self.species_code.clone().unwrap_or_default(),
            presentation: self.presentation.clone().unwrap_or_default(),
            state: self.state.clone().unwrap_or_default(),
            vessel: self.vessel_name.clone().unwrap_or_default(),
            day: self.landing_day(),
        }
    }
}

fn deserialize_authority<'de, D>(deserializer: D) -> Result<Option<DevolvedAuthority>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(DevolvedAuthority::parse))
}

/// UK jurisdiction that governs a vessel's landing-data obligations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DevolvedAuthority {
    England,
    Wales,
    Scotland,
    #[serde(rename = "Northern Ireland")]
    NorthernIreland,
    Jersey,
    Guernsey,
    #[serde(rename = "Isle of Man")]
    IsleOfMan,
}

impl DevolvedAuthority {
    pub const fn label(self) -> &'static str {
        match self {
            DevolvedAuthority::England => "England",
            DevolvedAuthority::Wales => "Wales",
            DevolvedAuthority::Scotland => "Scotland",
            DevolvedAuthority::NorthernIreland => "Northern Ireland",
            DevolvedAuthority::Jersey => "Jersey",
            DevolvedAuthority::Guernsey => "Guernsey",
            DevolvedAuthority::IsleOfMan => "Isle of Man",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|ch| ch.is_ascii_alphabetic())
            .map(|ch| ch.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "england" => Some(Self::England),
            "wales" => Some(Self::Wales),
            "scotland" => Some(Self::Scotland),
            "northernireland" => Some(Self::NorthernIreland),
            "jersey" => Some(Self::Jersey),
            "guernsey" => Some(Self::Guernsey),
            "isleofman" => Some(Self::IsleOfMan),
            _ => None,
        }
    }
}

/// Violation codes, declared in reporting precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ValidationRule {
    /// Species not on the landing, under high risk.
    #[serde(rename = "3C")]
    ThreeC,
    /// Landing overused by this certificate, under high risk.
    #[serde(rename = "3D")]
    ThreeD,
    /// Landing overused across all certificates.
    #[serde(rename = "4A")]
    FourA,
    #[serde(rename = "noDataSubmitted")]
    NoData,
    #[serde(rename = "noLicenceHolder")]
    NoLicenceHolder,
}

impl ValidationRule {
    pub const fn ordered() -> [ValidationRule; 5] {
        [
            ValidationRule::ThreeC,
            ValidationRule::ThreeD,
            ValidationRule::FourA,
            ValidationRule::NoData,
            ValidationRule::NoLicenceHolder,
        ]
    }

    pub const fn code(self) -> &'static str {
        match self {
            ValidationRule::ThreeC => "3C",
            ValidationRule::ThreeD => "3D",
            ValidationRule::FourA => "4A",
            ValidationRule::NoData => "noDataSubmitted",
            ValidationRule::NoLicenceHolder => "noLicenceHolder",
        }
    }
}

/// Natural key of a reporting unit. Dates compare by calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub species: String,
    pub presentation: String,
    pub state: String,
    pub vessel: String,
    pub day: LandingDay,
}

/// A reporting unit that failed at least one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReportItem {
    pub species: String,
    pub presentation: String,
    pub state: String,
    pub vessel: String,
    pub date: LandingDay,
    pub failures: Vec<ValidationRule>,
}

impl ValidationReportItem {
    pub(crate) fn from_key(key: GroupKey, failures: Vec<ValidationRule>) -> Self {
        Self {
            species: key.species,
            presentation: key.presentation,
            state: key.state,
            vessel: key.vessel,
            date: key.day,
            failures,
        }
    }
}
