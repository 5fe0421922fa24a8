use kube::ResourceExt;
use tracing::{debug, info, instrument};

use crate::crd::api_manager::{ApiManager, ApiManagerStatus};

use super::ReconcileErr;
use super::client::{StatusClient, WriteOutcome};
use super::conditions::conditions_equal;
use super::summary::summaries_equal;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PersistOutcome {
    /// Stored status already matches; nothing written.
    Unchanged,
    Written,
    /// The instance changed under us; a later pass will recompute.
    Conflict,
}

/// Semantic equality: transition timestamps and list order do not count.
pub fn status_equal(current: &ApiManagerStatus, desired: &ApiManagerStatus) -> bool {
    conditions_equal(&current.conditions, &desired.conditions)
        && summaries_equal(&current.deployments, &desired.deployments)
}

/// Write `desired` back onto `instance` unless it matches what is stored.
/// The write carries the instance's resourceVersion, so a concurrent update
/// surfaces as [`PersistOutcome::Conflict`] instead of an error.
#[instrument(level = "debug", skip_all, fields(ns = %namespace, name = %name))]
pub async fn persist_status<C>(
    client: &C,
    namespace: &str,
    name: &str,
    instance: &ApiManager,
    desired: ApiManagerStatus,
) -> Result<PersistOutcome, ReconcileErr>
where
    C: StatusClient + ?Sized,
{
    if let Some(current) = instance.status.as_ref() {
        if status_equal(current, &desired) {
            debug!("status unchanged; skipping write");
            return Ok(PersistOutcome::Unchanged);
        }
    }
    debug!(
        resource_version = ?instance.resource_version(),
        "status differs; writing"
    );

    let mut updated = instance.clone();
    updated.status = Some(desired);
    match client.replace_status(namespace, name, &updated).await {
        WriteOutcome::Written => Ok(PersistOutcome::Written),
        WriteOutcome::Conflict => {
            info!("failed to update status: resource might just be outdated");
            Ok(PersistOutcome::Conflict)
        }
        WriteOutcome::Encode(e) => Err(ReconcileErr::Serialize(e)),
        WriteOutcome::Fatal(e) => Err(ReconcileErr::UpdateStatus(e)),
    }
}
