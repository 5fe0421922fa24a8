use k8s_openapi::api::apps::v1::Deployment;

use crate::crd::api_manager::{CONDITION_AVAILABLE, Condition, ConditionStatus};

use super::observed::ObservedWorkload;

pub const REASON_READY: &str = "ComponentsReady";
pub const REASON_NOT_READY: &str = "ComponentsNotReady";

/// Latest generation observed and the `Available` condition reports True.
pub fn is_deployment_available(deployment: &Deployment) -> bool {
    let Some(status) = deployment.status.as_ref() else {
        return false;
    };
    let generation = deployment.metadata.generation.unwrap_or(0);
    if status.observed_generation.unwrap_or(0) < generation {
        return false;
    }
    status
        .conditions
        .as_ref()
        .and_then(|conds| conds.iter().find(|c| c.type_ == "Available"))
        .is_some_and(|c| c.status == "True")
}

/// Every expected name has an observed, available workload. Absence fails.
pub fn workloads_available(
    expected: &[&str],
    observed: &[ObservedWorkload],
) -> bool {
    expected.iter().all(|name| {
        observed
            .iter()
            .find(|w| w.name == *name)
            .is_some_and(|w| w.available)
    })
}

/// Binary aggregate: never Unknown.
pub fn available_condition(
    workloads_available: bool,
    routes_ready: bool,
) -> Condition {
    let available = workloads_available && routes_ready;
    Condition {
        type_: CONDITION_AVAILABLE.to_string(),
        status: ConditionStatus::from(available),
        reason: Some(
            if available { REASON_READY } else { REASON_NOT_READY }.into(),
        ),
        message: None,
        last_transition_time: None,
    }
}
