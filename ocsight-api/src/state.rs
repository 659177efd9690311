//! Application State
//!
//! Shared state for the ocsight API server

use std::sync::Arc;

use crate::config::OcsightConfig;
use crate::health::HealthChecker;
use crate::kubernetes::ClusterInspector;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<OcsightConfig>,
    pub inspector: Arc<dyn ClusterInspector>,
    pub health: Arc<HealthChecker>,
}

impl AppState {
    pub fn new(config: OcsightConfig, inspector: Arc<dyn ClusterInspector>) -> Self {
        Self {
            config: Arc::new(config),
            inspector,
            health: Arc::new(HealthChecker::new(env!("CARGO_PKG_VERSION"))),
        }
    }
}
