//! Landing compliance: risk scoring, legal-due rules and violation reporting for export
//! certificate landing checks.

pub mod dates;
pub mod deminimis;
pub mod domain;
pub mod enrichment;
pub mod foreign;
pub mod import;
pub mod legal_due;
pub mod licence;
pub mod risk;
pub mod router;
pub mod rules;
pub mod service;

#[cfg(test)]
mod tests;

pub use dates::LandingDay;
pub use deminimis::{is_electronic_log_source, is_within_deminimus, DeminimisPolicy};
pub use domain::{
    DevolvedAuthority, GroupKey, SubmissionRecord, ValidationReportItem, ValidationRule,
};
pub use enrichment::{LandingAssessment, LandingEnricher};
pub use foreign::{
    classify_foreign_document_batch, ForeignBatchOutcome, ForeignCertificateRow,
    ForeignDocumentStatus, ForeignRowFailure,
};
pub use import::{read_csv_records, read_json_records, read_records_from_path, ImportError};
pub use legal_due::{is_legally_due, LANDING_DATA_WEIGHT_TOLERANCE_KG};
pub use licence::{LicenceLookup, LicenceRegistry, VesselLicence};
pub use risk::{
    RiskConfig, RiskDimension, RiskScoreCalculator, RiskScoreProvider, RiskScoreTable,
    RiskWeights,
};
pub use router::landing_router;
pub use rules::ComplianceRuleEngine;
pub use service::LandingComplianceService;
