//! ocsight API Library
//!
//! Read-only OpenShift/Kubernetes cluster introspection, exposed as MCP
//! tools for AI agents and as a small REST surface.

// Core modules
pub mod config;
pub mod error;

// Application state
pub mod state;
pub use state::AppState;

// Kubernetes integration
pub mod kubernetes;

// MCP surface
pub mod mcp;

// HTTP routes
pub mod routes;

// Logging configuration
pub mod logging;

// Health checks and readiness probes
pub mod health;
