use crate::cli::ServeArgs;
use crate::infra::{cors_layer, AppState};
use crate::routes::api_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use compliance_tracker::checks::{CheckStore, InsightEngine};
use compliance_tracker::config::AppConfig;
use compliance_tracker::error::AppError;
use compliance_tracker::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));

    let store = Arc::new(CheckStore::open(&config.storage.path));
    let insights = Arc::new(InsightEngine::from_artifact(
        config.insights.model_path.as_deref(),
    ));

    let app_state = AppState {
        store,
        insights,
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = api_router()
        .layer(Extension(app_state.clone()))
        .layer(cors_layer(&config.cors))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        records = app_state.store.len(),
        model_loaded = app_state.insights.has_model(),
        "compliance tracker API ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
