use crate::infra::{AppState, ComplianceService};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use landing_compliance::workflows::landings::landing_router;
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_operational_routes(service: Arc<ComplianceService>) -> axum::Router {
    landing_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use landing_compliance::workflows::landings::{
        LandingComplianceService, LicenceRegistry, RiskConfig, RiskScoreTable,
    };
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn app(ready: bool) -> axum::Router {
        let service = Arc::new(LandingComplianceService::new(
            Arc::new(RiskScoreTable::default()),
            Arc::new(LicenceRegistry::default()),
            RiskConfig::default(),
        ));
        let recorder = PrometheusBuilder::new().build_recorder();
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(recorder.handle()),
        };

        with_operational_routes(service).layer(Extension(state))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let response = app(true)
            .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn readiness_reflects_startup_flag() {
        let response = app(false)
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_json(response).await, json!({ "status": "initializing" }));

        let response = app(true)
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn landing_routes_are_mounted_alongside_operational_ones() {
        let payload = json!({
            "records": [{
                "documentNumber": "GBR-2019-CC-1",
                "vesselName": "DAYBREAK",
                "speciesCode": "LBE",
                "presentation": "WHL",
                "state": "FRE",
                "dateLanded": "2019-07-10",
                "licenceHolder": "Daybreak Fishing Ltd",
                "isLandingExists": true,
                "isSpeciesExists": true,
                "isOverusedAllCerts": true
            }]
        });
        let request = Request::post("/api/v1/landings/validation-report")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .expect("request");

        let response = app(true).oneshot(request).await.expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["items"][0]["failures"], json!(["4A"]));
    }
}
