//! Fixtures shared by the controller unit tests.

use k8s_openapi::api::apps::v1::{
    Deployment, DeploymentCondition, DeploymentSpec, DeploymentStatus,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{
    ObjectMeta, OwnerReference,
};
use kube::error::ErrorResponse;

use crate::crd::api_manager::{ApiManager, ApiManagerSpec};
use crate::crd::route::{
    ROUTE_ADMITTED, Route, RouteIngress, RouteIngressCondition, RouteSpec,
    RouteStatus,
};

pub const NS: &str = "3scale";
pub const NAME: &str = "apimanager-sample";
pub const UID: &str = "6a1f2f4e-0000-4000-8000-000000000001";

pub fn api_manager(spec: serde_json::Value) -> ApiManager {
    let spec: ApiManagerSpec = serde_json::from_value(spec).unwrap();
    let mut am = ApiManager::new(NAME, spec);
    am.metadata.namespace = Some(NS.into());
    am.metadata.uid = Some(UID.into());
    am.metadata.resource_version = Some("1".into());
    am
}

pub fn owner_ref(uid: &str) -> OwnerReference {
    OwnerReference {
        api_version: "apps.3scale.net/v1alpha1".into(),
        kind: "ApiManager".into(),
        name: NAME.into(),
        uid: uid.into(),
        controller: Some(true),
        ..Default::default()
    }
}

/// Deployment owned by `owner_uid` with `ready` of `replicas` pods up.
pub fn deployment(
    name: &str,
    owner_uid: &str,
    replicas: i32,
    ready: i32,
) -> Deployment {
    let available = ready >= replicas;
    Deployment {
        metadata: ObjectMeta {
            name: Some(name.into()),
            namespace: Some(NS.into()),
            generation: Some(2),
            owner_references: Some(vec![owner_ref(owner_uid)]),
            ..Default::default()
        },
        spec: Some(DeploymentSpec {
            replicas: Some(replicas),
            ..Default::default()
        }),
        status: Some(DeploymentStatus {
            observed_generation: Some(2),
            ready_replicas: Some(ready),
            conditions: Some(vec![DeploymentCondition {
                type_: "Available".into(),
                status: if available { "True" } else { "False" }.into(),
                ..Default::default()
            }]),
            ..Default::default()
        }),
    }
}

pub fn available_deployment(name: &str) -> Deployment {
    deployment(name, UID, 1, 1)
}

pub fn route(name: &str, host: &str, admitted: bool) -> Route {
    let mut r = Route::new(
        name,
        RouteSpec {
            host: Some(host.into()),
        },
    );
    r.metadata.namespace = Some(NS.into());
    r.status = Some(RouteStatus {
        ingress: vec![RouteIngress {
            host: Some(host.into()),
            router_name: Some("default".into()),
            conditions: vec![RouteIngressCondition {
                type_: ROUTE_ADMITTED.into(),
                status: if admitted { "True" } else { "False" }.into(),
            }],
        }],
    });
    r
}

/// Admitted routes for every default hostname of tenant/domain.
pub fn default_routes(tenant: &str, domain: &str) -> Vec<Route> {
    super::routes::expected_route_hosts(tenant, domain)
        .into_iter()
        .enumerate()
        .map(|(i, host)| route(&format!("route-{i}"), &host, true))
        .collect()
}

pub fn api_error(code: u16, reason: &str) -> kube::Error {
    kube::Error::Api(ErrorResponse {
        status: "Failure".into(),
        message: format!("{reason} from test"),
        reason: reason.into(),
        code,
    })
}
