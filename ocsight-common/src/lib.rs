//! Common types shared between ocsight-api and external consumers
//!
//! These are the wire-level records produced by the cluster introspection
//! operations: identity summaries, tagged listing outcomes and the
//! diagnostics channel that travels with every result.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Identity projection of a single cluster resource.
///
/// `name` is `metadata.name`, `version` is `metadata.resourceVersion`.
/// Both are guaranteed non-empty; items without usable identity metadata
/// are skipped at projection time and never emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ResourceSummary {
    /// Resource name
    pub name: String,
    /// Resource version from identity metadata
    pub version: String,
}

impl ResourceSummary {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Category of a diagnostic emitted alongside an introspection result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticCode {
    /// The discovery query itself failed; the group was treated as unsupported
    DiscoveryFailed,
    /// The cluster does not serve the required API group
    Unsupported,
    /// The collection (or version) fetch returned no data
    FetchFailed,
    /// A list item was skipped because its identity metadata was unusable
    ProjectionSkipped,
    /// A listed item could not be re-read by name (advisory only)
    Inconsistent,
}

/// Structured diagnostic attached to a result.
///
/// Diagnostics replace console-scraped warnings: callers and tests assert on
/// the `code` instead of parsing log output. They never change the outcome
/// they accompany.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub message: String,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Outcome of a capability-gated listing operation.
///
/// `Unsupported` and `FetchFailed` are explicit non-error results: a caller
/// can always tell "the cluster can't do this" apart from "the cluster did
/// this and found nothing" (`Listed` with zero items).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ListOutcome {
    /// The collection was fetched; items are in source order
    Listed { items: Vec<ResourceSummary> },
    /// The cluster does not serve the required API group
    Unsupported,
    /// The collection fetch returned no data
    FetchFailed,
}

impl ListOutcome {
    pub fn is_listed(&self) -> bool {
        matches!(self, Self::Listed { .. })
    }

    /// Items of a `Listed` outcome; empty slice otherwise.
    pub fn items(&self) -> &[ResourceSummary] {
        match self {
            Self::Listed { items } => items,
            _ => &[],
        }
    }
}

/// A listing outcome together with its diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ListReport {
    #[serde(flatten)]
    pub outcome: ListOutcome,
    /// Advisory diagnostics; never alter the outcome
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl ListReport {
    pub fn listed(items: Vec<ResourceSummary>) -> Self {
        Self {
            outcome: ListOutcome::Listed { items },
            diagnostics: Vec::new(),
        }
    }

    pub fn unsupported(diagnostic: Diagnostic) -> Self {
        Self {
            outcome: ListOutcome::Unsupported,
            diagnostics: vec![diagnostic],
        }
    }

    pub fn fetch_failed(diagnostic: Diagnostic) -> Self {
        Self {
            outcome: ListOutcome::FetchFailed,
            diagnostics: vec![diagnostic],
        }
    }

    pub fn with_diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostics.push(diagnostic);
        self
    }

    /// True if any diagnostic carries the given code.
    pub fn has_diagnostic(&self, code: DiagnosticCode) -> bool {
        self.diagnostics.iter().any(|d| d.code == code)
    }
}

/// Version information reported by the cluster control plane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ClusterVersion {
    /// Kubernetes apiserver version (e.g. "v1.32.1")
    pub kubernetes: String,
    /// OpenShift distribution version, when the cluster reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openshift: Option<String>,
}

/// Result of the version probe.
///
/// An absent `version` is the explicit failure marker: the probe never
/// throws past the tool/endpoint boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VersionReport {
    pub version: Option<ClusterVersion>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl VersionReport {
    pub fn available(version: ClusterVersion) -> Self {
        Self {
            version: Some(version),
            diagnostics: Vec::new(),
        }
    }

    pub fn unavailable(diagnostic: Diagnostic) -> Self {
        Self {
            version: None,
            diagnostics: vec![diagnostic],
        }
    }

    pub fn with_diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostics.push(diagnostic);
        self
    }
}
