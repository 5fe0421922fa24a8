pub mod availability;
pub mod client;
pub mod conditions;
pub mod expected;
pub mod observed;
pub mod routes;
pub mod status;
pub mod status_reconciler;
pub mod summary;

use std::sync::Arc;

use futures_util::StreamExt;
use k8s_openapi::api::apps::v1::Deployment;
use kube::{
    Client, Resource, ResourceExt,
    api::Api,
    runtime::{Controller, controller::Action, watcher::Config},
};
use tracing::{error, info, warn};

use crate::config::OperatorConfig;
use crate::crd::api_manager::ApiManager;

pub use client::{KubeStatusClient, StatusClient, WriteOutcome};
pub use status_reconciler::{ReconcileOutcome, StatusReconciler};

#[derive(thiserror::Error, Debug)]
pub enum ReconcileErr {
    #[error("failed to get deployment {name}: {source}")]
    FetchDeployment {
        name: String,
        #[source]
        source: kube::Error,
    },
    #[error("failed to list routes: {0}")]
    ListRoutes(#[source] kube::Error),
    #[error("failed to update status: {0}")]
    UpdateStatus(#[source] kube::Error),
    #[error("failed to serialize status: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub struct ControllerContext {
    pub reconciler: StatusReconciler<KubeStatusClient>,
    pub cfg: OperatorConfig,
}

pub async fn run_controller(
    client: Client,
    cfg: OperatorConfig,
) -> anyhow::Result<()> {
    let (api, deployments): (Api<ApiManager>, Api<Deployment>) =
        match cfg.watch_namespace() {
            Some(ns) => (
                Api::namespaced(client.clone(), ns),
                Api::namespaced(client.clone(), ns),
            ),
            None => (Api::all(client.clone()), Api::all(client.clone())),
        };
    info!(namespace = ?cfg.watch_namespace(), "starting ApiManager controller");

    let ctx = Arc::new(ControllerContext {
        reconciler: StatusReconciler::new(KubeStatusClient::new(client)),
        cfg,
    });

    Controller::new(api, Config::default())
        .owns(deployments, Config::default())
        .shutdown_on_signal()
        .run(reconcile, error_policy, ctx)
        .for_each(|res| async move {
            match res {
                Ok((obj_ref, action)) => {
                    info!(%obj_ref, ?action, "reconciled")
                }
                Err(e) => error!(error = ?e, "reconcile error"),
            }
        })
        .await;

    Ok(())
}

async fn reconcile(
    obj: Arc<ApiManager>,
    ctx: Arc<ControllerContext>,
) -> Result<Action, ReconcileErr> {
    if obj.meta().deletion_timestamp.is_some() {
        return Ok(Action::await_change());
    }
    let action = match ctx.reconciler.reconcile(&obj).await? {
        ReconcileOutcome::Done => Action::requeue(ctx.cfg.resync_interval()),
        ReconcileOutcome::Requeue => {
            Action::requeue(ctx.cfg.conflict_requeue())
        }
    };
    Ok(action)
}

fn error_policy(
    obj: Arc<ApiManager>,
    error: &ReconcileErr,
    ctx: Arc<ControllerContext>,
) -> Action {
    warn!(name = %obj.name_any(), %error, "status reconcile failed");
    Action::requeue(ctx.cfg.error_requeue())
}

#[cfg(test)]
mod expected_tests;
#[cfg(test)]
mod test_support;
