//! MCP server implementation for cluster introspection
//!
//! Exposes the inspector's operations to AI agents via the Model Context
//! Protocol: JSON-RPC 2.0 over stdio. Every failure is converted into a
//! typed JSON-RPC response at this boundary; a failed tool call never takes
//! the process down.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::kubernetes::ClusterInspector;
use crate::mcp::resources::{self, ResourcePath};
use crate::mcp::tools::{GetClusterInfoInput, GetCrdInfoInput, GetDeploymentConfigsInput};

/// MCP protocol version implemented by this server.
const PROTOCOL_VERSION: &str = "2024-11-05";

/// Server identity reported during initialization.
#[derive(Debug, Clone, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

/// MCP server for cluster introspection.
///
/// Generic over the inspector so the protocol layer can be driven against a
/// mock backend in tests.
#[derive(Clone)]
pub struct McpServer<I: ClusterInspector + 'static> {
    inspector: Arc<I>,
}

impl<I: ClusterInspector + 'static> McpServer<I> {
    /// Create a new MCP server owning its inspector.
    pub fn new(inspector: I) -> Self {
        Self {
            inspector: Arc::new(inspector),
        }
    }

    /// Create a new MCP server sharing an existing inspector.
    pub fn with_shared(inspector: Arc<I>) -> Self {
        Self { inspector }
    }

    /// Get server info for MCP initialization.
    pub fn server_info() -> ServerInfo {
        ServerInfo {
            name: "ocsight-mcp".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Tool definitions for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ToolDefinitions {
    /// Available tools
    pub tools: Vec<ToolInfo>,
}

/// Information about a single tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ToolInfo {
    /// Tool name
    pub name: String,
    /// Tool description
    pub description: String,
    /// Input schema (JSON Schema)
    pub input_schema: Value,
}

impl ToolDefinitions {
    /// Get all available tool definitions.
    pub fn all() -> Self {
        Self {
            tools: vec![
                ToolInfo {
                    name: "get_crd_info".to_string(),
                    description: "Get custom resource definitions (CRD) information".to_string(),
                    input_schema: serde_json::to_value(schemars::schema_for!(GetCrdInfoInput))
                        .unwrap_or_default(),
                },
                ToolInfo {
                    name: "get_openshift_cluster_info".to_string(),
                    description: "Get current OpenShift cluster information".to_string(),
                    input_schema: serde_json::to_value(schemars::schema_for!(GetClusterInfoInput))
                        .unwrap_or_default(),
                },
                ToolInfo {
                    name: "get_deployment_config_list".to_string(),
                    description: "Get list of all OpenShift DeploymentConfigs".to_string(),
                    input_schema: serde_json::to_value(schemars::schema_for!(
                        GetDeploymentConfigsInput
                    ))
                    .unwrap_or_default(),
                },
            ],
        }
    }
}

// ============================================================================
// JSON-RPC Types
// ============================================================================

/// JSON-RPC 2.0 Request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC version (always "2.0")
    pub jsonrpc: String,
    /// Request ID
    pub id: Option<Value>,
    /// Method name
    pub method: String,
    /// Parameters (optional)
    #[serde(default)]
    pub params: Value,
}

/// JSON-RPC 2.0 Response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// JSON-RPC version (always "2.0")
    pub jsonrpc: String,
    /// Request ID (null for notifications)
    pub id: Option<Value>,
    /// Result (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error (on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC 2.0 Error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Error code
    pub code: i32,
    /// Error message
    pub message: String,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

// Standard JSON-RPC error codes
pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

// ============================================================================
// MCP Protocol Implementation
// ============================================================================

impl<I: ClusterInspector + 'static> McpServer<I> {
    /// Handle an incoming JSON-RPC request.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        debug!(method = %request.method, "Handling MCP request");

        match request.method.as_str() {
            // MCP Protocol Methods
            "initialize" => self.handle_initialize(request.id),
            "initialized" => {
                debug!("Client sent initialized notification");
                JsonRpcResponse::success(request.id, serde_json::json!({}))
            }
            "ping" => JsonRpcResponse::success(request.id, serde_json::json!({})),

            // Tool Methods
            "tools/list" => self.handle_tools_list(request.id),
            "tools/call" => self.handle_tools_call(request.id, request.params).await,

            // Resource Methods
            "resources/list" => self.handle_resources_list(request.id),
            "resources/read" => self.handle_resources_read(request.id, request.params).await,

            // Unknown method
            _ => {
                warn!(method = %request.method, "Unknown method");
                JsonRpcResponse::error(
                    request.id,
                    METHOD_NOT_FOUND,
                    format!("Method not found: {}", request.method),
                )
            }
        }
    }

    /// Handle initialize request.
    fn handle_initialize(&self, id: Option<Value>) -> JsonRpcResponse {
        let server_info = Self::server_info();
        let result = serde_json::json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {
                    "listChanged": false
                },
                "resources": {
                    "subscribe": false,
                    "listChanged": false
                }
            },
            "serverInfo": {
                "name": server_info.name,
                "version": server_info.version
            }
        });

        info!("MCP server initialized");
        JsonRpcResponse::success(id, result)
    }

    /// Handle tools/list request.
    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let tool_defs = ToolDefinitions::all();
        let tools: Vec<Value> = tool_defs
            .tools
            .iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect();

        JsonRpcResponse::success(id, serde_json::json!({ "tools": tools }))
    }

    /// Handle tools/call request.
    async fn handle_tools_call(&self, id: Option<Value>, params: Value) -> JsonRpcResponse {
        #[derive(Debug, Deserialize)]
        struct ToolCallParams {
            name: String,
            #[serde(default)]
            arguments: Value,
        }

        let params: ToolCallParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => {
                return JsonRpcResponse::error(id, INVALID_PARAMS, format!("Invalid params: {}", e));
            }
        };

        debug!(tool = %params.name, "Calling tool");

        let result = match params.name.as_str() {
            "get_crd_info" => {
                let input: GetCrdInfoInput =
                    serde_json::from_value(params.arguments).unwrap_or_default();
                if let Some(namespace) = &input.namespace {
                    debug!(namespace = %namespace, "namespace parameter ignored; CRDs are cluster-scoped");
                }
                match self.inspector.crd_info().await {
                    Ok(report) => serde_json::to_value(report).unwrap_or_default(),
                    Err(e) => return JsonRpcResponse::error(id, INTERNAL_ERROR, e.to_string()),
                }
            }
            "get_openshift_cluster_info" => match self.inspector.cluster_version().await {
                Ok(report) => serde_json::to_value(report).unwrap_or_default(),
                Err(e) => return JsonRpcResponse::error(id, INTERNAL_ERROR, e.to_string()),
            },
            "get_deployment_config_list" => match self.inspector.deployment_configs().await {
                Ok(report) => serde_json::to_value(report).unwrap_or_default(),
                Err(e) => return JsonRpcResponse::error(id, INTERNAL_ERROR, e.to_string()),
            },
            _ => {
                return JsonRpcResponse::error(
                    id,
                    METHOD_NOT_FOUND,
                    format!("Unknown tool: {}", params.name),
                );
            }
        };

        // Format result as MCP tool result
        let content = serde_json::json!([{
            "type": "text",
            "text": serde_json::to_string_pretty(&result).unwrap_or_default()
        }]);

        JsonRpcResponse::success(id, serde_json::json!({ "content": content }))
    }

    /// Handle resources/list request.
    fn handle_resources_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let resources = resources::list_available_resources();
        let resource_list: Vec<Value> = resources
            .iter()
            .map(|r| {
                serde_json::json!({
                    "uri": r.uri,
                    "name": r.name,
                    "description": r.description,
                    "mimeType": r.mime_type
                })
            })
            .collect();

        JsonRpcResponse::success(id, serde_json::json!({ "resources": resource_list }))
    }

    /// Handle resources/read request.
    async fn handle_resources_read(&self, id: Option<Value>, params: Value) -> JsonRpcResponse {
        #[derive(Debug, Deserialize)]
        struct ReadParams {
            uri: String,
        }

        let params: ReadParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => {
                return JsonRpcResponse::error(id, INVALID_PARAMS, format!("Invalid params: {}", e));
            }
        };

        let resource_path = match resources::parse_resource_uri(&params.uri) {
            Some(p) => p,
            None => {
                return JsonRpcResponse::error(
                    id,
                    INVALID_PARAMS,
                    format!("Invalid resource URI: {}", params.uri),
                );
            }
        };

        let content = match resource_path {
            ResourcePath::Crds => match self.inspector.crd_info().await {
                Ok(report) => serde_json::to_string_pretty(&report).unwrap_or_default(),
                Err(e) => return JsonRpcResponse::error(id, INTERNAL_ERROR, e.to_string()),
            },
            ResourcePath::DeploymentConfigs => {
                match self.inspector.deployment_configs_raw().await {
                    Ok(raw) => serde_json::to_string_pretty(&raw).unwrap_or_default(),
                    Err(e) => return JsonRpcResponse::error(id, INTERNAL_ERROR, e.to_string()),
                }
            }
            ResourcePath::Version => match self.inspector.cluster_version().await {
                Ok(report) => serde_json::to_string_pretty(&report).unwrap_or_default(),
                Err(e) => return JsonRpcResponse::error(id, INTERNAL_ERROR, e.to_string()),
            },
        };

        let result = serde_json::json!({
            "contents": [{
                "uri": params.uri,
                "mimeType": "application/json",
                "text": content
            }]
        });

        JsonRpcResponse::success(id, result)
    }

    /// Run the MCP server over stdio.
    pub async fn serve_stdio(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let stdin = tokio::io::stdin();
        let mut stdout = tokio::io::stdout();
        let reader = BufReader::new(stdin);
        let mut lines = reader.lines();

        info!("MCP server listening on stdio");

        while let Some(line) = lines.next_line().await? {
            if line.is_empty() {
                continue;
            }

            debug!(request = %line, "Received request");

            let request: JsonRpcRequest = match serde_json::from_str(&line) {
                Ok(r) => r,
                Err(e) => {
                    error!(error = %e, "Failed to parse request");
                    let response =
                        JsonRpcResponse::error(None, PARSE_ERROR, format!("Parse error: {}", e));
                    let response_json = serde_json::to_string(&response)?;
                    stdout.write_all(response_json.as_bytes()).await?;
                    stdout.write_all(b"\n").await?;
                    stdout.flush().await?;
                    continue;
                }
            };

            let response = self.handle_request(request).await;
            let response_json = serde_json::to_string(&response)?;

            debug!(response = %response_json, "Sending response");

            stdout.write_all(response_json.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }

        info!("MCP server shutdown");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kubernetes::K8sResult;
    use async_trait::async_trait;
    use ocsight_common::{ListReport, VersionReport};

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
    fn test_server_info() {
        let info = McpServer::<DummyInspector>::server_info();
        assert_eq!(info.name, "ocsight-mcp");
    }

    #[test]
    fn test_tool_definitions() {
        let tools = ToolDefinitions::all();
        assert_eq!(tools.tools.len(), 3);
        assert!(tools.tools.iter().any(|t| t.name == "get_crd_info"));
        assert!(tools
            .tools
            .iter()
            .any(|t| t.name == "get_openshift_cluster_info"));
        assert!(tools
            .tools
            .iter()
            .any(|t| t.name == "get_deployment_config_list"));
    }

    #[tokio::test]
    async fn test_ping() {
        let server = McpServer::new(DummyInspector);
        let response = server
            .handle_request(JsonRpcRequest {
                jsonrpc: "2.0".to_string(),
                id: Some(serde_json::json!(1)),
                method: "ping".to_string(),
                params: serde_json::json!({}),
            })
            .await;
        assert!(response.error.is_none());
    }
}
