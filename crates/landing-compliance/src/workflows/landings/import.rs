use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::{DevolvedAuthority, SubmissionRecord};
use super::foreign::ForeignCertificateRow;

/// Errors raised while reading landing query exports.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid CSV export: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid JSON export: {0}")]
    Json(#[from] serde_json::Error),
    #[error("row {row}: column {column} has unreadable value '{value}'")]
    InvalidField {
        row: usize,
        column: &'static str,
        value: String,
    },
    #[error("export contained no data")]
    EmptyInput,
}

/// Reads a file, choosing the JSON reader for `.json` and CSV for everything else.
pub fn read_records_from_path<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<SubmissionRecord>, ImportError> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        let raw = std::fs::read_to_string(path)?;
        read_json_records(&raw)
    } else {
        let file = std::fs::File::open(path)?;
        read_csv_records(file)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordsPayload {
    List(Vec<SubmissionRecord>),
    Wrapped { records: Vec<SubmissionRecord> },
}

/// Accepts either a bare array of records or `{ "records": [...] }`.
pub fn read_json_records(raw: &str) -> Result<Vec<SubmissionRecord>, ImportError> {
    if raw.trim().is_empty() {
        return Err(ImportError::EmptyInput);
    }

    let records = match serde_json::from_str::<RecordsPayload>(raw)? {
        RecordsPayload::List(records) => records,
        RecordsPayload::Wrapped { records } => records,
    };
    Ok(records)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ForeignRowsPayload {
    List(Vec<ForeignCertificateRow>),
    Wrapped { rows: Vec<ForeignCertificateRow> },
}

pub fn read_foreign_rows_json(raw: &str) -> Result<Vec<ForeignCertificateRow>, ImportError> {
    if raw.trim().is_empty() {
        return Err(ImportError::EmptyInput);
    }

    let rows = match serde_json::from_str::<ForeignRowsPayload>(raw)? {
        ForeignRowsPayload::List(rows) => rows,
        ForeignRowsPayload::Wrapped { rows } => rows,
    };
    Ok(rows)
}

/// Reads a CSV export whose header row uses the JSON field names. Empty cells are absent
/// values; unknown columns are ignored.
pub fn read_csv_records<R: Read>(reader: R) -> Result<Vec<SubmissionRecord>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, row) in csv_reader.deserialize::<SubmissionRow>().enumerate() {
        // Header is line 1.
        records.push(row?.into_record(index + 2)?);
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmissionRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    document_number: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    created_at: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    exporter_account_id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    exporter_contact_id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pln: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    vessel_name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    species_code: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    presentation: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    state: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    date_landed: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    first_date_time_landing_data_retrieved: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    licence_holder: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    weight_on_cert: Option<String>,
    #[serde(
        rename = "isLandingExists",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    landing_exists: Option<String>,
    #[serde(
        rename = "isSpeciesExists",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    species_exists: Option<String>,
    #[serde(
        rename = "isOverusedThisCert",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    overused_this_cert: Option<String>,
    #[serde(
        rename = "isOverusedAllCerts",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    overused_all_certs: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    data_ever_expected: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    vessel_overridden_by_admin: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    landing_data_expected_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    landing_data_end_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    source: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    vessel_length: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    da: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    is_quota_species: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    has_sales_note: Option<String>,
}

impl SubmissionRow {
    fn into_record(self, row: usize) -> Result<SubmissionRecord, ImportError> {
        let da = match self.da {
            Some(raw) => Some(DevolvedAuthority::parse(&raw).ok_or(ImportError::InvalidField {
                row,
                column: "da",
                value: raw,
            })?),
            None => None,
        };

        Ok(SubmissionRecord {
            document_number: self.document_number.unwrap_or_default(),
            created_at: self.created_at,
            exporter_account_id: self.exporter_account_id,
            exporter_contact_id: self.exporter_contact_id,
            pln: self.pln,
            vessel_name: self.vessel_name,
            species_code: self.species_code,
            presentation: self.presentation,
            state: self.state,
            date_landed: self.date_landed,
            first_date_time_landing_data_retrieved: self.first_date_time_landing_data_retrieved,
            licence_holder: self.licence_holder,
            weight_on_cert: parse_number(row, "weightOnCert", self.weight_on_cert)?,
            landing_exists: parse_flag(row, "isLandingExists", self.landing_exists)?
                .unwrap_or(false),
            species_exists: parse_flag(row, "isSpeciesExists", self.species_exists)?
                .unwrap_or(false),
            overused_this_cert: parse_flag(row, "isOverusedThisCert", self.overused_this_cert)?
                .unwrap_or(false),
            overused_all_certs: parse_flag(row, "isOverusedAllCerts", self.overused_all_certs)?
                .unwrap_or(false),
            data_ever_expected: parse_flag(row, "dataEverExpected", self.data_ever_expected)?,
            vessel_overridden_by_admin: parse_flag(
                row,
                "vesselOverriddenByAdmin",
                self.vessel_overridden_by_admin,
            )?,
            landing_data_expected_date: self.landing_data_expected_date,
            landing_data_end_date: self.landing_data_end_date,
            source: self.source,
            vessel_length: parse_number(row, "vesselLength", self.vessel_length)?,
            da,
            is_quota_species: parse_flag(row, "isQuotaSpecies", self.is_quota_species)?,
            has_sales_note: parse_flag(row, "hasSalesNote", self.has_sales_note)?,
        })
    }
}

fn parse_flag(
    row: usize,
    column: &'static str,
    value: Option<String>,
) -> Result<Option<bool>, ImportError> {
    let Some(raw) = value else {
        return Ok(None);
    };

    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(Some(true)),
        "false" | "no" | "n" | "0" => Ok(Some(false)),
        _ => Err(ImportError::InvalidField {
            row,
            column,
            value: raw,
        }),
    }
}

fn parse_number(
    row: usize,
    column: &'static str,
    value: Option<String>,
) -> Result<Option<f64>, ImportError> {
    let Some(raw) = value else {
        return Ok(None);
    };

    match raw.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(Some(number)),
        _ => Err(ImportError::InvalidField {
            row,
            column,
            value: raw,
        }),
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
