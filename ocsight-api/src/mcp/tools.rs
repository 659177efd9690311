//! MCP tool inputs for cluster introspection
//!
//! Tools are read-only: each one maps onto a single inspector operation and
//! returns the shared report records from `ocsight-common` as its output.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input for the get_crd_info tool
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct GetCrdInfoInput {
    /// Namespace hint. CRDs are cluster-scoped; the parameter is accepted
    /// for interface compatibility and not used for filtering.
    #[serde(default)]
    pub namespace: Option<String>,
}

/// Input for the get_openshift_cluster_info tool
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct GetClusterInfoInput {}

/// Input for the get_deployment_config_list tool
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct GetDeploymentConfigsInput {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_is_optional() {
        let input: GetCrdInfoInput = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(input.namespace.is_none());

        let input: GetCrdInfoInput =
            serde_json::from_value(serde_json::json!({ "namespace": "default" })).unwrap();
        assert_eq!(input.namespace.as_deref(), Some("default"));
    }
}
