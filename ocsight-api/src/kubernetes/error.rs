//! Kubernetes error types and ApiError mapping
//!
//! Maps kube-rs errors to ocsight API errors for consistent error handling.

use crate::error::ApiError;
use thiserror::Error;

/// Kubernetes-specific errors
#[derive(Debug, Error)]
pub enum K8sError {
    /// Connection to the cluster control plane could not be established
    #[error("Cluster connection failed: {0}")]
    Connection(String),

    /// Invalid kubeconfig
    #[error("Invalid kubeconfig: {0}")]
    InvalidKubeconfig(String),

    /// Error from kube-rs client
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    /// The cluster does not serve a required API group
    #[error("API group not supported: {0}")]
    Unsupported(String),

    /// Internal system error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<K8sError> for ApiError {
    fn from(err: K8sError) -> Self {
        match err {
            K8sError::Connection(msg) => {
                ApiError::ServiceUnavailable(format!("Cluster not reachable: {}", msg))
            }
            K8sError::InvalidKubeconfig(msg) => ApiError::ValidationError(msg),
            K8sError::Kube(e) => match &e {
                kube::Error::Api(ae) if ae.code == 401 => ApiError::AuthenticationFailed,
                kube::Error::Api(ae) if ae.code == 403 => ApiError::Forbidden(ae.message.clone()),
                kube::Error::Api(ae) if ae.code == 404 => ApiError::NotFound(ae.message.clone()),
                _ => ApiError::Internal(format!("Kubernetes error: {}", e)),
            },
            K8sError::Unsupported(group) => ApiError::NotFound(format!(
                "Cluster does not support the API group {}",
                group
            )),
            K8sError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

/// Result type alias for Kubernetes operations
pub type K8sResult<T> = std::result::Result<T, K8sError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_maps_to_not_found() {
        let err = K8sError::Unsupported("apps.openshift.io".to_string());
        let api_err: ApiError = err.into();
        let response = api_err.to_error_response();
        assert_eq!(response.status, 404);
        assert!(response.message.contains("apps.openshift.io"));
    }

    #[test]
    fn connection_maps_to_service_unavailable() {
        let err = K8sError::Connection("connection refused".to_string());
        let api_err: ApiError = err.into();
        assert_eq!(api_err.to_error_response().status, 503);
    }

    #[test]
    fn api_status_codes_are_preserved() {
        let kube_err = kube::Error::Api(kube::error::ErrorResponse {
            status: "Failure".to_string(),
            message: "deploymentconfigs.apps.openshift.io is forbidden".to_string(),
            reason: "Forbidden".to_string(),
            code: 403,
        });
        let api_err: ApiError = K8sError::from(kube_err).into();
        assert_eq!(api_err.to_error_response().status, 403);
    }
}
