//! HTTP route definitions
//!
//! The REST surface is deliberately small: health probes and the raw
//! DeploymentConfig passthrough.

use axum::{extract::State, routing::get, Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ApiResult;
use crate::health::{LivenessResponse, ReadinessResponse};
use crate::state::AppState;

/// Build the API router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/health/live", get(liveness_probe))
        .route("/api/health/ready", get(readiness_probe))
        .route("/info/cluster", get(info_cluster))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Simple health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Liveness probe for container orchestration
async fn liveness_probe(State(state): State<AppState>) -> Json<LivenessResponse> {
    Json(state.health.liveness())
}

/// Readiness probe for container orchestration
async fn readiness_probe(State(state): State<AppState>) -> Json<ReadinessResponse> {
    Json(state.health.readiness())
}

/// Raw DeploymentConfig collection passthrough
///
/// Returns the collection as the cluster shaped it. Clusters without the
/// apps.openshift.io group get a 404, unreachable clusters a 503.
async fn info_cluster(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    let raw = state.inspector.deployment_configs_raw().await?;
    Ok(Json(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OcsightConfig;
    use crate::kubernetes::{ClusterInspector, K8sResult};
    use async_trait::async_trait;
    use ocsight_common::{ListReport, VersionReport};
    use std::sync::Arc;

    struct DummyInspector;

    #[async_trait]
    impl ClusterInspector for DummyInspector {
        async fn crd_info(&self) -> K8sResult<ListReport> {
            Ok(ListReport::listed(vec![]))
        }
        async fn deployment_configs(&self) -> K8sResult<ListReport> {
            Ok(ListReport::listed(vec![]))
        }
        async fn deployment_configs_raw(&self) -> K8sResult<serde_json::Value> {
            Ok(serde_json::json!({ "items": [] }))
        }
        async fn cluster_version(&self) -> K8sResult<VersionReport> {
            Ok(VersionReport {
                version: None,
                diagnostics: vec![],
            })
        }
    }

    #[test]
    fn test_build_router() {
        let state = AppState::new(OcsightConfig::default(), Arc::new(DummyInspector));
        let _router = build_router(state);
        // Router builds successfully
    }
}
