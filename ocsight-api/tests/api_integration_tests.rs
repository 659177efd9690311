//! Integration tests for the REST API.
//!
//! Drives the axum router directly: health probes and the cluster info
//! passthrough, including the error mappings for unsupported and
//! unreachable clusters.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use ocsight_api::config::OcsightConfig;
use ocsight_api::routes::build_router;
use ocsight_api::AppState;

// ============================================================================
// Test Mocks
// ============================================================================

mod mock {
    use async_trait::async_trait;
    use ocsight_api::kubernetes::{ClusterInspector, K8sError, K8sResult};
    use ocsight_common::{ListReport, VersionReport};

    /// What the mock cluster does when asked for the raw collection.
    #[derive(Clone)]
    pub enum RawBehavior {
        Ok(serde_json::Value),
        Unsupported,
        Unreachable,
    }

    pub struct MockInspector {
        pub raw: RawBehavior,
    }

    #[async_trait]
    impl ClusterInspector for MockInspector {
        async fn crd_info(&self) -> K8sResult<ListReport> {
            Ok(ListReport::listed(vec![]))
        }

        async fn deployment_configs(&self) -> K8sResult<ListReport> {
            Ok(ListReport::listed(vec![]))
        }

        async fn deployment_configs_raw(&self) -> K8sResult<serde_json::Value> {
            match &self.raw {
                RawBehavior::Ok(value) => Ok(value.clone()),
                RawBehavior::Unsupported => {
                    Err(K8sError::Unsupported("apps.openshift.io".to_string()))
                }
                RawBehavior::Unreachable => {
                    Err(K8sError::Connection("connection refused".to_string()))
                }
            }
        }

        async fn cluster_version(&self) -> K8sResult<VersionReport> {
            Ok(VersionReport {
                version: None,
                diagnostics: vec![],
            })
        }
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

fn create_app(raw: mock::RawBehavior) -> axum::Router {
    let state = AppState::new(
        OcsightConfig::default(),
        Arc::new(mock::MockInspector { raw }),
    );
    build_router(state)
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    (status, body)
}

fn parse(body: &[u8]) -> Value {
    serde_json::from_slice(body).expect("body should be valid JSON")
}

// ============================================================================
// Health Tests
// ============================================================================

#[tokio::test]
async fn test_health_is_fixed_ok() {
    let app = create_app(mock::RawBehavior::Unreachable);
    // Health has no dependency checks: it stays OK even when the cluster
    // is unreachable.
    let (status, body) = get(app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}

#[tokio::test]
async fn test_liveness_probe() {
    let app = create_app(mock::RawBehavior::Unreachable);
    let (status, body) = get(app, "/api/health/live").await;
    assert_eq!(status, StatusCode::OK);
    let json = parse(&body);
    assert_eq!(json["alive"], true);
}

#[tokio::test]
async fn test_readiness_probe() {
    let app = create_app(mock::RawBehavior::Unreachable);
    let (status, body) = get(app, "/api/health/ready").await;
    assert_eq!(status, StatusCode::OK);
    let json = parse(&body);
    assert_eq!(json["ready"], true);
    assert!(json["version"].as_str().unwrap().len() > 0);
}

// ============================================================================
// Passthrough Tests
// ============================================================================

#[tokio::test]
async fn test_info_cluster_passthrough() {
    let raw = json!({
        "apiVersion": "apps.openshift.io/v1",
        "items": [
            { "metadata": { "name": "frontend", "resourceVersion": "42" } },
            { "metadata": { "name": "backend", "resourceVersion": "43" } }
        ]
    });
    let app = create_app(mock::RawBehavior::Ok(raw.clone()));

    let (status, body) = get(app, "/info/cluster").await;
    assert_eq!(status, StatusCode::OK);
    // The collection comes back exactly as the cluster shaped it.
    assert_eq!(parse(&body), raw);
}

#[tokio::test]
async fn test_info_cluster_unsupported_cluster() {
    let app = create_app(mock::RawBehavior::Unsupported);

    let (status, body) = get(app, "/info/cluster").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let json = parse(&body);
    assert_eq!(json["error"], "NOT_FOUND");
    assert!(json["message"]
        .as_str()
        .unwrap()
        .contains("apps.openshift.io"));
}

#[tokio::test]
async fn test_info_cluster_unreachable_cluster() {
    let app = create_app(mock::RawBehavior::Unreachable);

    let (status, body) = get(app, "/info/cluster").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let json = parse(&body);
    assert_eq!(json["error"], "SERVICE_UNAVAILABLE");
}

#[tokio::test]
async fn test_unknown_route() {
    let app = create_app(mock::RawBehavior::Unreachable);
    let (status, _body) = get(app, "/info/nodes").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
