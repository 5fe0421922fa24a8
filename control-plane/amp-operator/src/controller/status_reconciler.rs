use chrono::{DateTime, SecondsFormat, Utc};
use kube::{Resource, ResourceExt};
use tracing::{debug, instrument};

use crate::crd::api_manager::{ApiManager, ApiManagerStatus};

use super::ReconcileErr;
use super::availability::{available_condition, workloads_available};
use super::client::StatusClient;
use super::conditions::set_condition;
use super::expected::{DeploymentFlags, expected_deployment_names};
use super::observed::collect_observed_workloads;
use super::routes::default_routes_ready;
use super::status::{PersistOutcome, persist_status};
use super::summary::deployment_summary;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReconcileOutcome {
    Done,
    /// Status write lost a race; run again shortly.
    Requeue,
}

/// Identity of the instance being evaluated.
#[derive(Clone, Debug)]
struct InstanceRef {
    namespace: String,
    name: String,
    uid: String,
}

impl InstanceRef {
    fn from_resource(instance: &ApiManager) -> Result<Self, ReconcileErr> {
        let namespace = instance.namespace().ok_or_else(|| {
            ReconcileErr::Config("ApiManager has no namespace".into())
        })?;
        let uid = instance.meta().uid.clone().ok_or_else(|| {
            ReconcileErr::Config("ApiManager has no uid".into())
        })?;
        Ok(Self {
            namespace,
            name: instance.name_any(),
            uid,
        })
    }
}

/// Computes and publishes the status of one ApiManager per call:
/// resolve, collect, evaluate, merge, persist. Holds no per-instance state.
pub struct StatusReconciler<C> {
    client: C,
}

impl<C: StatusClient> StatusReconciler<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub async fn reconcile(
        &self,
        instance: &ApiManager,
    ) -> Result<ReconcileOutcome, ReconcileErr> {
        self.reconcile_at(instance, Utc::now()).await
    }

    #[instrument(skip_all, fields(ns = ?instance.namespace(), name = %instance.name_any()))]
    pub async fn reconcile_at(
        &self,
        instance: &ApiManager,
        now: DateTime<Utc>,
    ) -> Result<ReconcileOutcome, ReconcileErr> {
        debug!("START");
        let target = InstanceRef::from_resource(instance)?;
        let desired = self.calculate_status(&target, instance, now).await?;

        let outcome = persist_status(
            &self.client,
            &target.namespace,
            &target.name,
            instance,
            desired,
        )
        .await?;
        debug!(?outcome, "status reconciled");
        Ok(match outcome {
            PersistOutcome::Unchanged | PersistOutcome::Written => {
                ReconcileOutcome::Done
            }
            PersistOutcome::Conflict => ReconcileOutcome::Requeue,
        })
    }

    async fn calculate_status(
        &self,
        target: &InstanceRef,
        instance: &ApiManager,
        now: DateTime<Utc>,
    ) -> Result<ApiManagerStatus, ReconcileErr> {
        let spec = &instance.spec;
        if spec.wildcard_domain.trim().is_empty() {
            return Err(ReconcileErr::Config("wildcardDomain is empty".into()));
        }
        if spec.tenant_name().trim().is_empty() {
            return Err(ReconcileErr::Config("tenantName is empty".into()));
        }

        let flags = DeploymentFlags::from_spec(spec)?;
        let expected = expected_deployment_names(&flags);
        let observed = collect_observed_workloads(
            &self.client,
            &target.namespace,
            &target.uid,
            &expected,
        )
        .await?;

        let workloads_ok = workloads_available(&expected, &observed);
        let routes_ok = default_routes_ready(
            &self.client,
            &target.namespace,
            spec.tenant_name(),
            &spec.wildcard_domain,
        )
        .await?;
        debug!(
            system_database = %flags.system_database,
            expected = expected.len(),
            observed = observed.len(),
            workloads_ok,
            routes_ok,
            "computed availability"
        );

        let previous = instance
            .status
            .as_ref()
            .map(|s| s.conditions.clone())
            .unwrap_or_default();
        let conditions = set_condition(
            &previous,
            available_condition(workloads_ok, routes_ok),
            &now.to_rfc3339_opts(SecondsFormat::Secs, true),
        );

        Ok(ApiManagerStatus {
            conditions,
            deployments: deployment_summary(&observed),
        })
    }
}
