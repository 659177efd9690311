//! Cluster version probe
//!
//! Reads the apiserver's version info and, when the cluster is
//! OpenShift-flavored, the distribution version from the `ClusterVersion`
//! object. Failures degrade to an absent version plus diagnostics; nothing
//! here throws past the operation boundary.

use k8s_openapi::apimachinery::pkg::version::Info;
use kube::api::{Api, DynamicObject};
use kube::Client;

use ocsight_common::{ClusterVersion, Diagnostic, DiagnosticCode, VersionReport};

use super::discovery::{self, Capability, CLUSTER_VERSIONS};

/// The well-known name of the singleton ClusterVersion object on OpenShift.
const CLUSTER_VERSION_NAME: &str = "version";

/// Probe the connected cluster for version information.
pub async fn cluster_version(client: &Client) -> VersionReport {
    let info = match client.apiserver_version().await {
        Ok(info) => info,
        Err(e) => {
            tracing::error!(error = %e, "failed to read apiserver version");
            return VersionReport::unavailable(Diagnostic::new(
                DiagnosticCode::FetchFailed,
                format!("failed to read apiserver version: {}", e),
            ));
        }
    };

    let mut diagnostics = Vec::new();
    let mut version = version_from_info(&info);
    version.openshift = openshift_version(client, &mut diagnostics).await;

    VersionReport {
        version: Some(version),
        diagnostics,
    }
}

/// Map apiserver version info to the reported Kubernetes version string.
///
/// Prefers the full git version ("v1.32.1"); falls back to "major.minor"
/// when a control plane omits it.
pub(crate) fn version_from_info(info: &Info) -> ClusterVersion {
    let kubernetes = if info.git_version.is_empty() {
        format!("{}.{}", info.major, info.minor)
    } else {
        info.git_version.clone()
    };
    ClusterVersion {
        kubernetes,
        openshift: None,
    }
}

/// Read the OpenShift distribution version, gated on the
/// `config.openshift.io` group. Returns `None` on vanilla clusters and on
/// any failure, recording what happened in the diagnostics.
async fn openshift_version(client: &Client, diagnostics: &mut Vec<Diagnostic>) -> Option<String> {
    let resource = match discovery::probe(client, &CLUSTER_VERSIONS).await {
        Capability::Supported(resource) => resource,
        Capability::Unsupported(diagnostic) => {
            diagnostics.push(diagnostic);
            return None;
        }
    };

    let api: Api<DynamicObject> = Api::all_with(client.clone(), &resource);
    match api.get_opt(CLUSTER_VERSION_NAME).await {
        Ok(Some(obj)) => {
            let version = desired_version(&obj);
            if version.is_none() {
                diagnostics.push(Diagnostic::new(
                    DiagnosticCode::ProjectionSkipped,
                    "ClusterVersion 'version' carries no status.desired.version",
                ));
            }
            version
        }
        Ok(None) => {
            diagnostics.push(Diagnostic::new(
                DiagnosticCode::FetchFailed,
                "ClusterVersion 'version' not found",
            ));
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to read ClusterVersion");
            diagnostics.push(Diagnostic::new(
                DiagnosticCode::FetchFailed,
                format!("failed to read ClusterVersion: {}", e),
            ));
            None
        }
    }
}

fn desired_version(obj: &DynamicObject) -> Option<String> {
    obj.data
        .pointer("/status/desired/version")
        .and_then(|v| v.as_str())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::api::ObjectMeta;

    fn info(major: &str, minor: &str, git_version: &str) -> Info {
        Info {
            major: major.to_string(),
            minor: minor.to_string(),
            git_version: git_version.to_string(),
            git_commit: String::new(),
            git_tree_state: String::new(),
            build_date: String::new(),
            go_version: String::new(),
            compiler: String::new(),
            platform: String::new(),
        }
    }

    #[test]
    fn prefers_git_version() {
        let version = version_from_info(&info("1", "32", "v1.32.1"));
        assert_eq!(version.kubernetes, "v1.32.1");
        assert!(version.openshift.is_none());
    }

    #[test]
    fn falls_back_to_major_minor() {
        let version = version_from_info(&info("1", "29", ""));
        assert_eq!(version.kubernetes, "1.29");
    }

    #[test]
    fn extracts_desired_version_from_cluster_version_object() {
        let obj = DynamicObject {
            types: None,
            metadata: ObjectMeta {
                name: Some(CLUSTER_VERSION_NAME.to_string()),
                ..Default::default()
            },
            data: serde_json::json!({
                "status": { "desired": { "version": "4.17.3" } }
            }),
        };
        assert_eq!(desired_version(&obj).as_deref(), Some("4.17.3"));

        let empty = DynamicObject {
            types: None,
            metadata: ObjectMeta::default(),
            data: serde_json::json!({ "status": {} }),
        };
        assert!(desired_version(&empty).is_none());
    }
}
