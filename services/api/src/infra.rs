use landing_compliance::error::AppError;
use landing_compliance::workflows::landings::{
    ImportError, LandingComplianceService, LicenceRegistry, RiskConfig, RiskScoreTable,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub(crate) type ComplianceService = LandingComplianceService<RiskScoreTable, LicenceRegistry>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Without a snapshot every base score is neutral, so only the weights drive the total.
pub(crate) fn load_risk_scores(path: Option<&Path>) -> Result<RiskScoreTable, AppError> {
    let Some(path) = path else {
        return Ok(RiskScoreTable::default());
    };

    let raw = std::fs::read_to_string(path)?;
    let table = RiskScoreTable::from_json(&raw).map_err(ImportError::from)?;
    Ok(table)
}

pub(crate) fn load_licences(path: Option<&Path>) -> Result<LicenceRegistry, AppError> {
    let Some(path) = path else {
        return Ok(LicenceRegistry::default());
    };

    let raw = std::fs::read_to_string(path)?;
    let registry = LicenceRegistry::from_json(&raw).map_err(ImportError::from)?;
    Ok(registry)
}

pub(crate) fn build_service(
    config: RiskConfig,
    risk_scores: Option<&Path>,
    licences: Option<&Path>,
) -> Result<ComplianceService, AppError> {
    let scores = load_risk_scores(risk_scores)?;
    let licences = load_licences(licences)?;
    Ok(LandingComplianceService::new(
        Arc::new(scores),
        Arc::new(licences),
        config,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use landing_compliance::workflows::landings::RiskScoreProvider;
    use std::io::Write;
    use std::path::PathBuf;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "landing-compliance-{}-{}",
            std::process::id(),
            name
        ));
        let mut file = std::fs::File::create(&path).expect("temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        path
    }

    #[test]
    fn missing_reference_data_falls_back_to_empty_sources() {
        let scores = load_risk_scores(None).expect("defaults");
        let licences = load_licences(None).expect("defaults");

        assert!(scores.vessel_risk_score("B192").is_none());
        assert!(licences.is_empty());
    }

    #[test]
    fn reference_data_loads_from_json_files() {
        let scores_path = write_temp("scores.json", r#"{ "vessels": { "B192": 0.7 } }"#);
        let licences_path = write_temp(
            "licences.json",
            r#"[{ "pln": "B192", "vesselName": "DAYBREAK", "validFrom": "2019-01-01" }]"#,
        );

        let scores = load_risk_scores(Some(&scores_path)).expect("scores load");
        let licences = load_licences(Some(&licences_path)).expect("licences load");

        assert_eq!(scores.vessel_risk_score("B192"), Some(0.7));
        assert_eq!(licences.len(), 1);

        let _ = std::fs::remove_file(scores_path);
        let _ = std::fs::remove_file(licences_path);
    }

    #[test]
    fn malformed_snapshot_is_an_import_error() {
        let path = write_temp("broken.json", "{ not json");

        let err = load_risk_scores(Some(&path)).expect_err("rejects malformed snapshot");
        assert!(matches!(err, AppError::Import(ImportError::Json(_))));

        let _ = std::fs::remove_file(path);
    }
}
