use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;
use tracing::{debug, instrument, trace};

use super::ReconcileErr;
use super::availability::is_deployment_available;
use super::client::StatusClient;

/// A live deployment owned by the managing instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObservedWorkload {
    pub name: String,
    pub owner_uid: String,
    pub available: bool,
    pub desired_replicas: i32,
    pub ready_replicas: i32,
}

impl ObservedWorkload {
    fn from_deployment(
        name: &str,
        deployment: &Deployment,
        owner_uid: &str,
    ) -> Self {
        let desired_replicas = deployment
            .spec
            .as_ref()
            .and_then(|s| s.replicas)
            .unwrap_or(1);
        let ready_replicas = deployment
            .status
            .as_ref()
            .and_then(|s| s.ready_replicas)
            .unwrap_or(0);
        Self {
            name: name.to_string(),
            owner_uid: owner_uid.to_string(),
            available: is_deployment_available(deployment),
            desired_replicas,
            ready_replicas,
        }
    }
}

/// True when one of `owner_refs` points at `owner_uid`, whatever the kind.
pub fn is_owned_by(owner_refs: &[OwnerReference], owner_uid: &str) -> bool {
    owner_refs.iter().any(|r| r.uid == owner_uid)
}

/// Fetch each expected deployment and keep the ones the instance owns,
/// sorted by name. Not-found is skipped; any other error aborts the pass.
#[instrument(level = "debug", skip(client, names), fields(ns = %namespace))]
pub async fn collect_observed_workloads<C>(
    client: &C,
    namespace: &str,
    owner_uid: &str,
    names: &[&str],
) -> Result<Vec<ObservedWorkload>, ReconcileErr>
where
    C: StatusClient + ?Sized,
{
    let mut observed = Vec::with_capacity(names.len());
    for name in names {
        let deployment = client
            .get_deployment(namespace, name)
            .await
            .map_err(|source| ReconcileErr::FetchDeployment {
                name: name.to_string(),
                source,
            })?;
        let Some(deployment) = deployment else {
            trace!(%name, "deployment not found");
            continue;
        };
        let owner_refs = deployment
            .metadata
            .owner_references
            .as_deref()
            .unwrap_or_default();
        if !is_owned_by(owner_refs, owner_uid) {
            debug!(%name, "deployment not owned by this instance; ignoring");
            continue;
        }
        observed.push(ObservedWorkload::from_deployment(
            name,
            &deployment,
            owner_uid,
        ));
    }
    observed.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(observed)
}
