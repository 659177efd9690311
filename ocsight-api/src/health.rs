//! Health check and readiness probes
//!
//! Deliberately dependency-free: the inspector holds no standing cluster
//! connection, so there is nothing meaningful to probe without doing a
//! cluster round-trip on every health poll. Liveness and readiness report
//! process state only.

use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Liveness probe response (for k8s/container orchestration)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessResponse {
    pub alive: bool,
    pub timestamp: i64,
}

/// Readiness probe response (for k8s/container orchestration)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub version: String,
    pub uptime_seconds: u64,
    pub timestamp: i64,
}

/// Health checker for the running process
pub struct HealthChecker {
    start_time: Instant,
    version: String,
}

impl HealthChecker {
    pub fn new(version: &str) -> Self {
        Self {
            start_time: Instant::now(),
            version: version.to_string(),
        }
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Simple liveness check - is the service running?
    pub fn liveness(&self) -> LivenessResponse {
        LivenessResponse {
            alive: true,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }

    /// Readiness check - the server accepts traffic as soon as it is up
    pub fn readiness(&self) -> ReadinessResponse {
        ReadinessResponse {
            ready: true,
            version: self.version.clone(),
            uptime_seconds: self.uptime_seconds(),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_liveness() {
        let checker = HealthChecker::new("0.1.0");
        let response = checker.liveness();

        assert!(response.alive);
        assert!(response.timestamp > 0);
    }

    #[test]
    fn test_readiness() {
        let checker = HealthChecker::new("0.1.0");
        let response = checker.readiness();

        assert!(response.ready);
        assert_eq!(response.version, "0.1.0");
    }
}
