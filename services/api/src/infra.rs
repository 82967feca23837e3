use axum::http::HeaderValue;
use compliance_tracker::checks::{CheckStore, InsightEngine};
use compliance_tracker::config::CorsConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) store: Arc<CheckStore>,
    pub(crate) insights: Arc<InsightEngine>,
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn cors_layer(config: &CorsConfig) -> CorsLayer {
    if config.allows_any() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .origin_list()
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring malformed allowed origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

#[cfg(test)]
pub(crate) fn test_state(tag: &str) -> AppState {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let path = std::env::temp_dir().join(format!(
        "compliance-api-{tag}-{}.json",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    let recorder = PrometheusBuilder::new().build_recorder();
    AppState {
        store: Arc::new(CheckStore::open(path)),
        insights: Arc::new(InsightEngine::new(None)),
        readiness: Arc::new(AtomicBool::new(true)),
        metrics: Arc::new(recorder.handle()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_config_builds_permissive_layer() {
        let config = CorsConfig {
            allowed_origins: "*".to_string(),
        };
        let _ = cors_layer(&config);
    }

    #[test]
    fn explicit_origins_skip_malformed_entries() {
        let config = CorsConfig {
            allowed_origins: "https://ok.example,bad origin".to_string(),
        };
        let _ = cors_layer(&config);
    }
}
