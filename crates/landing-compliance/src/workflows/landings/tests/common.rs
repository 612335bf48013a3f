use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::workflows::landings::deminimis::DeminimisPolicy;
use crate::workflows::landings::domain::{SubmissionRecord, ValidationReportItem};
use crate::workflows::landings::licence::LicenceRegistry;
use crate::workflows::landings::risk::{
    RiskConfig, RiskScoreCalculator, RiskScoreTable, RiskWeights,
};
use crate::workflows::landings::rules::ComplianceRuleEngine;
use crate::workflows::landings::service::LandingComplianceService;

pub(super) const HIGH_RISK_PLN: &str = "B192";
pub(super) const LOW_RISK_PLN: &str = "WA1";

pub(super) fn risk_table() -> RiskScoreTable {
    RiskScoreTable::default()
        .with_vessel(HIGH_RISK_PLN, 1.0)
        .with_vessel(LOW_RISK_PLN, 0.1)
        .with_species("LBE", 1.0)
        .with_species("COD", 0.8)
        .with_exporter_account("ACC-1", 1.0)
        .with_exporter_contact("CON-9", 0.2)
}

pub(super) fn weights() -> RiskWeights {
    RiskWeights {
        threshold: 0.5,
        ..RiskWeights::default()
    }
}

pub(super) fn risk_config() -> RiskConfig {
    RiskConfig {
        weights: weights(),
        deminimis: DeminimisPolicy::default(),
    }
}

/// A landing that passes every rule when scored against [`risk_table`].
pub(super) fn compliant_record() -> SubmissionRecord {
    SubmissionRecord {
        document_number: "GBR-2019-CC-0001".to_string(),
        created_at: Some("2019-07-11T09:30:00Z".to_string()),
        exporter_account_id: Some("ACC-1".to_string()),
        exporter_contact_id: Some("CON-1".to_string()),
        pln: Some(HIGH_RISK_PLN.to_string()),
        vessel_name: Some("DAYBREAK".to_string()),
        species_code: Some("LBE".to_string()),
        presentation: Some("TEST".to_string()),
        state: Some("BAD".to_string()),
        date_landed: Some("2019-07-10".to_string()),
        first_date_time_landing_data_retrieved: Some("2019-07-10T18:00:00Z".to_string()),
        licence_holder: Some("Daybreak Fishing Ltd".to_string()),
        weight_on_cert: Some(120.0),
        landing_exists: true,
        species_exists: true,
        overused_this_cert: false,
        overused_all_certs: false,
        data_ever_expected: Some(true),
        vessel_overridden_by_admin: None,
        landing_data_expected_date: Some("2019-07-10".to_string()),
        landing_data_end_date: Some("2019-07-24".to_string()),
        source: Some("LANDING_DECLARATION".to_string()),
        vessel_length: None,
        da: None,
        is_quota_species: None,
        has_sales_note: None,
    }
}

pub(super) fn species_mismatch_record() -> SubmissionRecord {
    SubmissionRecord {
        document_number: "GBR-2019-CC-0002".to_string(),
        species_exists: false,
        ..compliant_record()
    }
}

pub(super) fn overused_record() -> SubmissionRecord {
    SubmissionRecord {
        document_number: "GBR-2019-CC-0003".to_string(),
        overused_this_cert: true,
        ..compliant_record()
    }
}

pub(super) fn missing_landing_record() -> SubmissionRecord {
    SubmissionRecord {
        document_number: "GBR-2019-CC-0004".to_string(),
        landing_exists: false,
        species_exists: false,
        ..compliant_record()
    }
}

pub(super) fn low_risk(mut record: SubmissionRecord) -> SubmissionRecord {
    record.pln = Some(LOW_RISK_PLN.to_string());
    record
}

pub(super) fn report_with(
    weights: &RiskWeights,
    records: &[SubmissionRecord],
) -> Vec<ValidationReportItem> {
    let table = risk_table();
    let deminimis = DeminimisPolicy::default();
    let engine = ComplianceRuleEngine::new(RiskScoreCalculator::new(&table, weights), &deminimis);
    engine.validation_report(records)
}

pub(super) fn report(records: &[SubmissionRecord]) -> Vec<ValidationReportItem> {
    report_with(&weights(), records)
}

pub(super) fn build_service(
    licences: LicenceRegistry,
) -> Arc<LandingComplianceService<RiskScoreTable, LicenceRegistry>> {
    Arc::new(LandingComplianceService::new(
        Arc::new(risk_table()),
        Arc::new(licences),
        risk_config(),
    ))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("valid json")
}
