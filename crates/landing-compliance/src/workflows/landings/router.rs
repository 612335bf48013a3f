use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::domain::{SubmissionRecord, ValidationReportItem};
use super::enrichment::LandingAssessment;
use super::foreign::{ForeignBatchOutcome, ForeignCertificateRow};
use super::licence::LicenceLookup;
use super::risk::RiskScoreProvider;
use super::service::LandingComplianceService;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LandingBatchRequest {
    #[serde(default)]
    pub records: Vec<SubmissionRecord>,
    /// Run licence enrichment before the rules.
    #[serde(default)]
    pub enrich: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationReportResponse {
    pub items: Vec<ValidationReportItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentResponse {
    pub assessments: Vec<LandingAssessment>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForeignClassificationRequest {
    #[serde(default)]
    pub rows: Vec<ForeignCertificateRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForeignClassificationResponse {
    #[serde(flatten)]
    pub outcome: ForeignBatchOutcome,
    pub rows: Vec<ForeignCertificateRow>,
}

/// Router builder exposing the landing report and classification endpoints.
pub fn landing_router<P, L>(service: Arc<LandingComplianceService<P, L>>) -> Router
where
    P: RiskScoreProvider + 'static,
    L: LicenceLookup + 'static,
{
    Router::new()
        .route(
            "/api/v1/landings/validation-report",
            post(validation_report_handler::<P, L>),
        )
        .route(
            "/api/v1/landings/assessments",
            post(assessment_handler::<P, L>),
        )
        .route(
            "/api/v1/foreign-documents/classification",
            post(foreign_classification_handler::<P, L>),
        )
        .with_state(service)
}

pub(crate) async fn validation_report_handler<P, L>(
    State(service): State<Arc<LandingComplianceService<P, L>>>,
    Json(request): Json<LandingBatchRequest>,
) -> Response
where
    P: RiskScoreProvider + 'static,
    L: LicenceLookup + 'static,
{
    let items = if request.enrich {
        service.assessed_report(&request.records)
    } else {
        service.validation_report(&request.records)
    };
    (StatusCode::OK, Json(ValidationReportResponse { items })).into_response()
}

pub(crate) async fn assessment_handler<P, L>(
    State(service): State<Arc<LandingComplianceService<P, L>>>,
    Json(request): Json<LandingBatchRequest>,
) -> Response
where
    P: RiskScoreProvider + 'static,
    L: LicenceLookup + 'static,
{
    let assessments = service.assess(&request.records);
    (StatusCode::OK, Json(AssessmentResponse { assessments })).into_response()
}

pub(crate) async fn foreign_classification_handler<P, L>(
    State(service): State<Arc<LandingComplianceService<P, L>>>,
    Json(request): Json<ForeignClassificationRequest>,
) -> Response
where
    P: RiskScoreProvider + 'static,
    L: LicenceLookup + 'static,
{
    let mut rows = request.rows;
    let outcome = service.classify_foreign(&mut rows);
    let status = if outcome.is_valid() {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    (status, Json(ForeignClassificationResponse { outcome, rows })).into_response()
}
