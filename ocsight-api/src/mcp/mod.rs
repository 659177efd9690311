//! MCP surface for cluster introspection
//!
//! Exposes the inspector's operations to AI agents over the Model Context
//! Protocol (JSON-RPC 2.0 on stdio): tools for the three introspection
//! operations and read-only resources mirroring the same data.

pub mod resources;
pub mod server;
pub mod tools;

pub use server::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, McpServer};
pub use server::{INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR};
