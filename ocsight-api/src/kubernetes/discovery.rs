//! API discovery and capability gating
//!
//! Every operation on a non-core resource kind runs through [`probe`] first.
//! Capability is resolved fresh on every operation; nothing here is cached.

use kube::discovery::{ApiResource, Discovery};
use kube::Client;

use ocsight_common::{Diagnostic, DiagnosticCode};

/// A resource kind that must pass the capability gate before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatedKind {
    /// API group, e.g. "apps.openshift.io"
    pub group: &'static str,
    /// Kind within the group, e.g. "DeploymentConfig"
    pub kind: &'static str,
}

/// CustomResourceDefinitions. Gated on the group rather than a pinned
/// version: legacy clusters may serve only v1beta1, current ones only v1,
/// and the listing binds to whichever version discovery recommends.
pub const CUSTOM_RESOURCE_DEFINITIONS: GatedKind = GatedKind {
    group: "apiextensions.k8s.io",
    kind: "CustomResourceDefinition",
};

/// OpenShift DeploymentConfigs; absent on vanilla Kubernetes.
pub const DEPLOYMENT_CONFIGS: GatedKind = GatedKind {
    group: "apps.openshift.io",
    kind: "DeploymentConfig",
};

/// OpenShift ClusterVersion objects; absent on vanilla Kubernetes.
pub const CLUSTER_VERSIONS: GatedKind = GatedKind {
    group: "config.openshift.io",
    kind: "ClusterVersion",
};

/// Result of a capability probe.
#[derive(Debug, Clone)]
pub enum Capability {
    /// The cluster serves the kind; the resolved resource is ready to query
    Supported(ApiResource),
    /// The cluster does not serve the kind (or discovery itself failed)
    Unsupported(Diagnostic),
}

/// Check whether the connected cluster serves a gated kind.
///
/// A discovery failure is treated as "unsupported" with a warning
/// diagnostic; it never aborts the calling operation.
pub async fn probe(client: &Client, kind: &GatedKind) -> Capability {
    let discovery = match Discovery::new(client.clone())
        .filter(&[kind.group])
        .run()
        .await
    {
        Ok(discovery) => discovery,
        Err(e) => {
            tracing::warn!(
                group = kind.group,
                error = %e,
                "API discovery failed, treating group as unsupported"
            );
            return Capability::Unsupported(Diagnostic::new(
                DiagnosticCode::DiscoveryFailed,
                format!("discovery for group '{}' failed: {}", kind.group, e),
            ));
        }
    };

    match discovery
        .get(kind.group)
        .and_then(|group| group.recommended_kind(kind.kind))
    {
        Some((resource, _caps)) => Capability::Supported(resource),
        None => {
            tracing::warn!(
                group = kind.group,
                kind = kind.kind,
                "cluster does not support this API group"
            );
            Capability::Unsupported(Diagnostic::new(
                DiagnosticCode::Unsupported,
                format!("cluster does not support the API group {}", kind.group),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gated_kinds_cover_the_introspected_groups() {
        assert_eq!(CUSTOM_RESOURCE_DEFINITIONS.group, "apiextensions.k8s.io");
        assert_eq!(DEPLOYMENT_CONFIGS.group, "apps.openshift.io");
        assert_eq!(DEPLOYMENT_CONFIGS.kind, "DeploymentConfig");
        assert_eq!(CLUSTER_VERSIONS.group, "config.openshift.io");
    }
}
