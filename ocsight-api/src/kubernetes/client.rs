//! Cluster connection handling
//!
//! Builds a fresh `kube::Client` per operation from injected configuration.
//! A handle is owned by the single operation that acquired it and is released
//! when it goes out of scope, on every exit path.

use std::path::PathBuf;

use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};

use super::error::{K8sError, K8sResult};

/// Source of cluster credentials.
///
/// Resolved in order: explicit kubeconfig path, in-cluster service account,
/// or the client library's default chain (KUBECONFIG env var, then
/// `~/.kube/config`, then in-cluster).
#[derive(Debug, Clone, Default)]
pub struct ConnectionProvider {
    kubeconfig: Option<PathBuf>,
    context: Option<String>,
    in_cluster: bool,
}

impl ConnectionProvider {
    pub fn new(kubeconfig: Option<PathBuf>, context: Option<String>, in_cluster: bool) -> Self {
        Self {
            kubeconfig,
            context,
            in_cluster,
        }
    }

    /// Provider using the client library's default credential chain.
    pub fn ambient() -> Self {
        Self::default()
    }

    /// Acquire a fresh connection handle for one operation.
    ///
    /// Any failure here (unreachable endpoint, auth failure, malformed
    /// config) is a connection error, fatal for the invocation that
    /// requested it and for nothing else.
    pub async fn connect(&self) -> K8sResult<Client> {
        if self.in_cluster {
            let config = Config::incluster().map_err(|e| {
                K8sError::Connection(format!("in-cluster config unavailable: {}", e))
            })?;
            return Client::try_from(config)
                .map_err(|e| K8sError::Connection(format!("failed to create client: {}", e)));
        }

        if let Some(path) = &self.kubeconfig {
            let kubeconfig = Kubeconfig::read_from(path).map_err(|e| {
                K8sError::InvalidKubeconfig(format!("failed to read {:?}: {}", path, e))
            })?;
            let config = Config::from_custom_kubeconfig(
                kubeconfig,
                &KubeConfigOptions {
                    context: self.context.clone(),
                    ..Default::default()
                },
            )
            .await
            .map_err(|e| K8sError::InvalidKubeconfig(format!("failed to create config: {}", e)))?;
            return Client::try_from(config)
                .map_err(|e| K8sError::Connection(format!("failed to create client: {}", e)));
        }

        Client::try_default()
            .await
            .map_err(|e| K8sError::Connection(format!("no usable cluster credentials: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_kubeconfig_is_an_invalid_kubeconfig_error() {
        let provider = ConnectionProvider::new(
            Some(PathBuf::from("/nonexistent/kubeconfig.yaml")),
            None,
            false,
        );
        match provider.connect().await {
            Err(K8sError::InvalidKubeconfig(msg)) => {
                assert!(msg.contains("kubeconfig.yaml"));
            }
            other => panic!("expected InvalidKubeconfig, got {:?}", other.map(|_| ())),
        }
    }
}
