use kube::ResourceExt;
use tracing::{debug, instrument};

use crate::crd::route::Route;

use super::ReconcileErr;
use super::client::StatusClient;

/// Public hostnames every instance serves, in a fixed order: backend
/// listener, gateway production, gateway staging, master portal, default
/// tenant developer portal, default tenant admin portal.
pub fn expected_route_hosts(tenant: &str, wildcard_domain: &str) -> Vec<String> {
    vec![
        format!("backend-{tenant}.{wildcard_domain}"),
        format!("api-{tenant}-apicast-production.{wildcard_domain}"),
        format!("api-{tenant}-apicast-staging.{wildcard_domain}"),
        format!("master.{wildcard_domain}"),
        format!("{tenant}.{wildcard_domain}"),
        format!("{tenant}-admin.{wildcard_domain}"),
    ]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteState {
    Ready,
    NotReady,
    NotFound,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteObservation {
    pub hostname: String,
    pub state: RouteState,
}

impl RouteObservation {
    pub fn is_ready(&self) -> bool {
        self.state == RouteState::Ready
    }
}

/// Match each expected host against the route inventory. The inventory is
/// scanned in name order so the first match is deterministic.
pub fn observe_routes(
    routes: &[Route],
    expected_hosts: &[String],
) -> Vec<RouteObservation> {
    let mut sorted: Vec<&Route> = routes.iter().collect();
    sorted.sort_by_key(|r| r.name_any());

    expected_hosts
        .iter()
        .map(|host| {
            let state = match sorted
                .iter()
                .find(|r| r.host() == Some(host.as_str()))
            {
                None => RouteState::NotFound,
                Some(r) if r.is_admitted() => RouteState::Ready,
                Some(_) => RouteState::NotReady,
            };
            RouteObservation {
                hostname: host.clone(),
                state,
            }
        })
        .collect()
}

/// List routes once and report whether every default hostname is served by
/// an admitted route. All hosts are checked so each failure gets logged.
#[instrument(level = "debug", skip(client), fields(ns = %namespace))]
pub async fn default_routes_ready<C>(
    client: &C,
    namespace: &str,
    tenant: &str,
    wildcard_domain: &str,
) -> Result<bool, ReconcileErr>
where
    C: StatusClient + ?Sized,
{
    let routes = client
        .list_routes(namespace)
        .await
        .map_err(ReconcileErr::ListRoutes)?;
    let expected = expected_route_hosts(tenant, wildcard_domain);

    let mut all_ready = true;
    for obs in observe_routes(&routes, &expected) {
        match obs.state {
            RouteState::Ready => {}
            RouteState::NotFound => {
                debug!(host = %obs.hostname, "route not found");
                all_ready = false;
            }
            RouteState::NotReady => {
                debug!(host = %obs.hostname, "route not ready");
                all_ready = false;
            }
        }
    }
    Ok(all_ready)
}
