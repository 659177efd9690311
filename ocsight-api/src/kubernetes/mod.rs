//! Kubernetes integration for ocsight
//!
//! Read-only cluster introspection over kube-rs:
//! - Connection handling (kubeconfig, in-cluster, default chain)
//! - Capability gating via API discovery
//! - Gated listing + identity summarization (CRDs, DeploymentConfigs)
//! - Version probing (apiserver + OpenShift ClusterVersion)

pub mod client;
pub mod discovery;
pub mod error;
pub mod inspector;
pub mod listing;
pub mod version;

pub use client::ConnectionProvider;
pub use error::{K8sError, K8sResult};
pub use inspector::{ClusterInspector, KubeInspector};
