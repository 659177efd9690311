//! MCP resources for cluster state access
//!
//! Resources provide read-only access to the same data the tools return,
//! addressed by `cluster://` URIs.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Resource info for listing
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ResourceInfo {
    /// Resource URI
    pub uri: String,
    /// Resource name
    pub name: String,
    /// Resource description
    pub description: String,
    /// MIME type
    pub mime_type: String,
}

/// All available resources
pub fn list_available_resources() -> Vec<ResourceInfo> {
    vec![
        ResourceInfo {
            uri: "cluster://crds".to_string(),
            name: "Custom Resource Definitions".to_string(),
            description: "Summaries of the cluster's CustomResourceDefinitions".to_string(),
            mime_type: "application/json".to_string(),
        },
        ResourceInfo {
            uri: "cluster://deploymentconfigs".to_string(),
            name: "DeploymentConfigs".to_string(),
            description: "Raw OpenShift DeploymentConfig collection".to_string(),
            mime_type: "application/json".to_string(),
        },
        ResourceInfo {
            uri: "cluster://version".to_string(),
            name: "Cluster Version".to_string(),
            description: "Cluster distribution version information".to_string(),
            mime_type: "application/json".to_string(),
        },
    ]
}

/// Parse a resource URI into its components
pub fn parse_resource_uri(uri: &str) -> Option<ResourcePath> {
    let stripped = uri.strip_prefix("cluster://")?;

    match stripped {
        "crds" => Some(ResourcePath::Crds),
        "deploymentconfigs" => Some(ResourcePath::DeploymentConfigs),
        "version" => Some(ResourcePath::Version),
        _ => None,
    }
}

/// Parsed resource path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourcePath {
    Crds,
    DeploymentConfigs,
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_uris() {
        assert_eq!(parse_resource_uri("cluster://crds"), Some(ResourcePath::Crds));
        assert_eq!(
            parse_resource_uri("cluster://deploymentconfigs"),
            Some(ResourcePath::DeploymentConfigs)
        );
        assert_eq!(
            parse_resource_uri("cluster://version"),
            Some(ResourcePath::Version)
        );
    }

    #[test]
    fn rejects_unknown_uris() {
        assert!(parse_resource_uri("cluster://pods").is_none());
        assert!(parse_resource_uri("orchestrator://crds").is_none());
        assert!(parse_resource_uri("crds").is_none());
    }

    #[test]
    fn every_listed_resource_parses() {
        for resource in list_available_resources() {
            assert!(
                parse_resource_uri(&resource.uri).is_some(),
                "unparseable listed uri: {}",
                resource.uri
            );
        }
    }
}
