use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use kube::api::{Api, ListParams, PostParams};
use kube::Client;
use tracing::trace;

#[cfg(test)]
use mockall::automock;

use crate::crd::api_manager::ApiManager;
use crate::crd::route::Route;

/// Result of a status write guarded by `metadata.resourceVersion`.
#[derive(Debug)]
pub enum WriteOutcome {
    Written,
    /// The stored record moved on since it was read (HTTP 409).
    Conflict,
    /// The instance could not be encoded; nothing was sent.
    Encode(serde_json::Error),
    Fatal(kube::Error),
}

/// Classify the API server's answer to a status replace.
pub(crate) fn write_outcome(res: Result<ApiManager, kube::Error>) -> WriteOutcome {
    match res {
        Ok(_) => WriteOutcome::Written,
        Err(kube::Error::Api(e)) if e.code == 409 => WriteOutcome::Conflict,
        Err(e) => WriteOutcome::Fatal(e),
    }
}

/// Cluster reads and writes the status pipeline depends on.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StatusClient: Send + Sync {
    /// Fetch a deployment by name; `Ok(None)` when it does not exist.
    async fn get_deployment(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<Deployment>, kube::Error>;

    /// List every route in the namespace.
    async fn list_routes(
        &self,
        namespace: &str,
    ) -> Result<Vec<Route>, kube::Error>;

    /// Replace the status subresource of `instance`.
    async fn replace_status(
        &self,
        namespace: &str,
        name: &str,
        instance: &ApiManager,
    ) -> WriteOutcome;
}

#[derive(Clone)]
pub struct KubeStatusClient {
    client: Client,
}

impl KubeStatusClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StatusClient for KubeStatusClient {
    async fn get_deployment(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<Deployment>, kube::Error> {
        let api: Api<Deployment> =
            Api::namespaced(self.client.clone(), namespace);
        api.get_opt(name).await
    }

    async fn list_routes(
        &self,
        namespace: &str,
    ) -> Result<Vec<Route>, kube::Error> {
        let api: Api<Route> = Api::namespaced(self.client.clone(), namespace);
        let list = api.list(&ListParams::default()).await?;
        trace!(%namespace, count = list.items.len(), "listed routes");
        Ok(list.items)
    }

    async fn replace_status(
        &self,
        namespace: &str,
        name: &str,
        instance: &ApiManager,
    ) -> WriteOutcome {
        let api: Api<ApiManager> =
            Api::namespaced(self.client.clone(), namespace);
        let data = match serde_json::to_vec(instance) {
            Ok(data) => data,
            Err(e) => return WriteOutcome::Encode(e),
        };
        write_outcome(
            api.replace_status(name, &PostParams::default(), data).await,
        )
    }
}
