//! Capability-gated resource listing and summarization
//!
//! The shared pattern behind the CRD and DeploymentConfig operations:
//! gate, fetch the collection, project identity metadata in source order,
//! then point-read the first item as an advisory consistency check.

use kube::api::{Api, DynamicObject, ListParams};
use kube::Client;

use ocsight_common::{Diagnostic, DiagnosticCode, ListOutcome, ListReport, ResourceSummary};

use super::discovery::{self, Capability, GatedKind};
use super::error::{K8sError, K8sResult};

/// List a gated kind and project each item into a [`ResourceSummary`].
///
/// Outcomes:
/// - group not served (or discovery failed) → `Unsupported`
/// - collection fetch returned no data → `FetchFailed`
/// - otherwise → `Listed`, order preserved from the source collection
///
/// A projection failure on one item skips that item and records a
/// diagnostic; it never aborts processing of the rest.
pub async fn list_summaries(client: &Client, kind: &GatedKind) -> ListReport {
    let mut diagnostics = Vec::new();

    let resource = match discovery::probe(client, kind).await {
        Capability::Supported(resource) => resource,
        Capability::Unsupported(diagnostic) => {
            diagnostics.push(diagnostic);
            return ListReport {
                outcome: ListOutcome::Unsupported,
                diagnostics,
            };
        }
    };

    let api: Api<DynamicObject> = Api::all_with(client.clone(), &resource);
    let list = match api.list(&ListParams::default()).await {
        Ok(list) => list,
        Err(e) => {
            tracing::error!(kind = kind.kind, error = %e, "no list returned");
            diagnostics.push(Diagnostic::new(
                DiagnosticCode::FetchFailed,
                format!("failed to list {}: {}", kind.kind, e),
            ));
            return ListReport {
                outcome: ListOutcome::FetchFailed,
                diagnostics,
            };
        }
    };

    let mut items = Vec::with_capacity(list.items.len());
    for (index, obj) in list.items.iter().enumerate() {
        match project_summary(obj) {
            Some(summary) => {
                tracing::debug!(
                    kind = kind.kind,
                    name = %summary.name,
                    version = %summary.version,
                    "projected resource"
                );
                items.push(summary);
            }
            None => {
                tracing::warn!(kind = kind.kind, index, "skipping item without identity metadata");
                diagnostics.push(Diagnostic::new(
                    DiagnosticCode::ProjectionSkipped,
                    format!("item {} of {} has no usable identity metadata", index, kind.kind),
                ));
            }
        }
    }

    // Point-read sanity check on the first listed item. Advisory only: the
    // summaries above are returned unmodified whatever happens here.
    if let Some(first) = items.first() {
        match api.get_opt(&first.name).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                tracing::warn!(kind = kind.kind, name = %first.name, "listed item not found by direct lookup");
                diagnostics.push(Diagnostic::new(
                    DiagnosticCode::Inconsistent,
                    format!(
                        "{} '{}' was listed but not found by direct lookup",
                        kind.kind, first.name
                    ),
                ));
            }
            Err(e) => {
                diagnostics.push(Diagnostic::new(
                    DiagnosticCode::Inconsistent,
                    format!("point read of {} '{}' failed: {}", kind.kind, first.name, e),
                ));
            }
        }
    }

    ListReport {
        outcome: ListOutcome::Listed { items },
        diagnostics,
    }
}

/// Fetch the raw collection for a gated kind.
///
/// Used by the REST passthrough, which returns the collection as the
/// cluster shaped it instead of projecting summaries. Unsupported clusters
/// surface as a typed error here since HTTP has no tagged-outcome channel.
pub async fn list_raw(client: &Client, kind: &GatedKind) -> K8sResult<serde_json::Value> {
    let resource = match discovery::probe(client, kind).await {
        Capability::Supported(resource) => resource,
        Capability::Unsupported(_) => return Err(K8sError::Unsupported(kind.group.to_string())),
    };

    let api: Api<DynamicObject> = Api::all_with(client.clone(), &resource);
    let list = api.list(&ListParams::default()).await?;
    serde_json::to_value(&list)
        .map_err(|e| K8sError::Internal(format!("failed to serialize {} list: {}", kind.kind, e)))
}

/// Project a resource's identity metadata into a summary.
///
/// Returns `None` when either field is missing or empty; callers skip such
/// items rather than emit partial summaries.
pub(crate) fn project_summary(obj: &DynamicObject) -> Option<ResourceSummary> {
    let name = obj.metadata.name.as_deref().filter(|n| !n.is_empty())?;
    let version = obj
        .metadata
        .resource_version
        .as_deref()
        .filter(|v| !v.is_empty())?;
    Some(ResourceSummary::new(name, version))
}
