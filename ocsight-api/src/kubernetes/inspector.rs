//! The inspector seam between the tool/HTTP surfaces and the cluster
//!
//! Surfaces depend on [`ClusterInspector`] rather than on kube directly, so
//! the protocol layers can be exercised against a mock backend and the real
//! backend stays a thin composition of the kubernetes sub-modules.

use async_trait::async_trait;

use ocsight_common::{ListReport, VersionReport};

use super::client::ConnectionProvider;
use super::discovery::{CUSTOM_RESOURCE_DEFINITIONS, DEPLOYMENT_CONFIGS};
use super::error::K8sResult;
use super::{listing, version};

/// Read-only cluster introspection operations.
///
/// Every method is stateless and independently retriable by the caller. An
/// `Err` means the connection itself could not be established; everything
/// that happens after a successful connect is expressed in the report.
#[async_trait]
pub trait ClusterInspector: Send + Sync {
    /// Summaries of the cluster's CustomResourceDefinitions.
    async fn crd_info(&self) -> K8sResult<ListReport>;

    /// Summaries of the cluster's OpenShift DeploymentConfigs.
    async fn deployment_configs(&self) -> K8sResult<ListReport>;

    /// The raw DeploymentConfig collection, as the cluster shaped it.
    async fn deployment_configs_raw(&self) -> K8sResult<serde_json::Value>;

    /// Cluster distribution version information.
    async fn cluster_version(&self) -> K8sResult<VersionReport>;
}

/// Inspector backed by a live cluster.
///
/// Each operation acquires its own fresh connection handle from the
/// provider and drops it on return; handles are never shared across
/// operations or cached between calls.
pub struct KubeInspector {
    provider: ConnectionProvider,
}

impl KubeInspector {
    pub fn new(provider: ConnectionProvider) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl ClusterInspector for KubeInspector {
    async fn crd_info(&self) -> K8sResult<ListReport> {
        let client = self.provider.connect().await?;
        Ok(listing::list_summaries(&client, &CUSTOM_RESOURCE_DEFINITIONS).await)
    }

    async fn deployment_configs(&self) -> K8sResult<ListReport> {
        let client = self.provider.connect().await?;
        Ok(listing::list_summaries(&client, &DEPLOYMENT_CONFIGS).await)
    }

    async fn deployment_configs_raw(&self) -> K8sResult<serde_json::Value> {
        let client = self.provider.connect().await?;
        listing::list_raw(&client, &DEPLOYMENT_CONFIGS).await
    }

    async fn cluster_version(&self) -> K8sResult<VersionReport> {
        let client = self.provider.connect().await?;
        Ok(version::cluster_version(&client).await)
    }
}
