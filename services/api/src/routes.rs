use crate::infra::AppState;
use crate::mock;
use axum::extract::Query;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Extension, Json, Router};
use chrono::Utc;
use compliance_tracker::checks::insights::AiInsights;
use compliance_tracker::checks::report::views::{DashboardSummary, DetailedStatistics, ScanResult};
use compliance_tracker::checks::{
    compute_dashboard, compute_statistics, parse_csv, perform_scan, ComplianceCheck,
};
use compliance_tracker::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeSet;
use tracing::info;

const DEFAULT_CHECK_LIMIT: usize = 100;
const MOCK_SCAN_LIMIT: usize = 10;

pub(crate) fn api_router() -> Router {
    Router::new()
        .route("/", get(healthcheck))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/upload", post(upload_endpoint))
        .route("/api/v1/dashboard", get(dashboard_endpoint))
        .route("/api/v1/ai-insights", get(ai_insights_endpoint))
        .route("/api/v1/checks", get(checks_endpoint))
        .route("/api/v1/frameworks", get(frameworks_endpoint))
        .route("/api/v1/providers", get(providers_endpoint))
        .route("/api/v1/scan", post(scan_endpoint))
        .route("/api/v1/statistics", get(statistics_endpoint))
        .route("/api/v1/data", delete(clear_data_endpoint))
        .route("/api/v1/data/status", get(data_status_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Acquire);
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

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct UploadResponse {
    pub(crate) message: String,
    pub(crate) count: usize,
}

pub(crate) async fn upload_endpoint(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<UploadResponse>, AppError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    if !content_type.contains("csv") {
        return Err(AppError::UnsupportedPayload(
            "only CSV uploads are supported".to_string(),
        ));
    }

    let records = parse_csv(body.as_bytes())?;
    let count = state.store.replace(records)?;
    info!(count, "compliance records uploaded");

    Ok(Json(UploadResponse {
        message: format!("Loaded {count} records"),
        count,
    }))
}

pub(crate) async fn dashboard_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<DashboardSummary> {
    if state.store.is_empty() {
        return Json(mock::mock_dashboard_summary());
    }
    Json(compute_dashboard(&state.store.current()))
}

pub(crate) async fn ai_insights_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<AiInsights> {
    if state.store.is_empty() {
        return Json(mock::mock_ai_insights());
    }

    let violations: Vec<ComplianceCheck> = state
        .store
        .current()
        .into_iter()
        .filter(ComplianceCheck::is_violation)
        .collect();
    Json(state.insights.generate(&violations, Utc::now()))
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ChecksQuery {
    pub(crate) framework: Option<String>,
    pub(crate) provider: Option<String>,
    pub(crate) severity: Option<String>,
    pub(crate) status: Option<String>,
    pub(crate) limit: Option<usize>,
}

pub(crate) async fn checks_endpoint(
    Extension(state): Extension<AppState>,
    Query(query): Query<ChecksQuery>,
) -> Json<Vec<ComplianceCheck>> {
    let source = data_source(&state);
    let limit = query.limit.unwrap_or(DEFAULT_CHECK_LIMIT);

    let checks = source
        .into_iter()
        .filter(|check| {
            query
                .framework
                .as_deref()
                .map_or(true, |framework| check.framework == framework)
                && query
                    .provider
                    .as_deref()
                    .map_or(true, |provider| check.provider == provider)
                && query
                    .severity
                    .as_deref()
                    .map_or(true, |severity| check.severity.label() == severity)
                && query
                    .status
                    .as_deref()
                    .map_or(true, |status| check.status.label() == status)
        })
        .take(limit)
        .collect();

    Json(checks)
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct FrameworksResponse {
    pub(crate) frameworks: Vec<String>,
}

pub(crate) async fn frameworks_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<FrameworksResponse> {
    let frameworks = data_source(&state)
        .into_iter()
        .map(|check| check.framework)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    Json(FrameworksResponse { frameworks })
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ProvidersResponse {
    pub(crate) providers: Vec<String>,
}

pub(crate) async fn providers_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<ProvidersResponse> {
    let providers = data_source(&state)
        .into_iter()
        .map(|check| check.provider)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    Json(ProvidersResponse { providers })
}

pub(crate) async fn scan_endpoint(Extension(state): Extension<AppState>) -> Json<ScanResult> {
    if state.store.is_empty() {
        // Mock preview only; real scans are never truncated.
        let mut results = mock::mock_compliance_checks();
        results.truncate(MOCK_SCAN_LIMIT);
        return Json(ScanResult {
            results,
            scanned_at: Utc::now(),
        });
    }

    Json(perform_scan(&state.store.current(), Utc::now()))
}

pub(crate) async fn statistics_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<DetailedStatistics> {
    Json(compute_statistics(&data_source(&state), Utc::now()))
}

pub(crate) async fn clear_data_endpoint(
    Extension(state): Extension<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.store.clear()?;
    Ok(Json(json!({
        "message": "All data cleared, returning to mock data"
    })))
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct DataStatusResponse {
    pub(crate) status: String,
    pub(crate) message: String,
    pub(crate) record_count: usize,
}

pub(crate) async fn data_status_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<DataStatusResponse> {
    let response = if state.store.is_empty() {
        DataStatusResponse {
            status: "mock_data".to_string(),
            message: "Using mock data - no real data uploaded".to_string(),
            record_count: 0,
        }
    } else {
        DataStatusResponse {
            status: "real_data".to_string(),
            message: "Using uploaded real data".to_string(),
            record_count: state.store.len(),
        }
    };
    Json(response)
}

fn data_source(state: &AppState) -> Vec<ComplianceCheck> {
    if state.store.is_empty() {
        mock::mock_compliance_checks()
    } else {
        state.store.current()
    }
}
