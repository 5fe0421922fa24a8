use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TENANT_NAME: &str = "3scale";

#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, JsonSchema)]
#[kube(
    group = "apps.3scale.net",
    version = "v1alpha1",
    kind = "ApiManager",
    plural = "apimanagers",
    shortname = "apim",
    namespaced,
    status = "ApiManagerStatus"
)]
#[serde(rename_all = "camelCase")]
pub struct ApiManagerSpec {
    /// Root domain every public route hostname is built from
    pub wildcard_domain: String,
    /// Default tenant name; drives the tenant-specific route hostnames
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<SystemSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zync: Option<ZyncSpec>,
    /// Components the platform consumes from outside the namespace
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_components: Option<ExternalComponentsSpec>,
}

impl ApiManagerSpec {
    pub fn tenant_name(&self) -> &str {
        self.tenant_name.as_deref().unwrap_or(DEFAULT_TENANT_NAME)
    }

    pub fn zync_enabled(&self) -> bool {
        self.zync.as_ref().and_then(|z| z.enabled).unwrap_or(true)
    }

    fn external(&self) -> ExternalComponentsSpec {
        self.external_components.clone().unwrap_or_default()
    }

    pub fn external_system_database(&self) -> bool {
        self.external()
            .system
            .and_then(|s| s.database)
            .unwrap_or(false)
    }

    pub fn external_system_redis(&self) -> bool {
        self.external().system.and_then(|s| s.redis).unwrap_or(false)
    }

    pub fn external_zync_database(&self) -> bool {
        self.external().zync.and_then(|z| z.database).unwrap_or(false)
    }

    pub fn system_database(&self) -> Option<&SystemDatabaseSpec> {
        self.system.as_ref().and_then(|s| s.database.as_ref())
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct SystemSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<SystemDatabaseSpec>,
}

/// At most one engine may be configured; none means internal MySQL.
#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct SystemDatabaseSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mysql: Option<DatabaseEngineSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postgresql: Option<DatabaseEngineSpec>,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseEngineSpec {
    /// Image override for the database workload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct ZyncSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExternalComponentsSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<ExternalSystemComponents>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zync: Option<ExternalZyncComponents>,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExternalSystemComponents {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redis: Option<bool>,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExternalZyncComponents {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<bool>,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiManagerStatus {
    /// K8s-style conditions, at most one per type
    #[serde(default, skip_serializing_if = "ConditionList::is_empty")]
    pub conditions: ConditionList,
    /// Ready/starting/stopped breakdown of the owned deployments
    #[serde(default)]
    pub deployments: DeploymentSummary,
}

pub const CONDITION_AVAILABLE: &str = "Available";

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq, Eq)]
pub struct Condition {
    #[serde(rename = "type")]
    pub type_: String,
    pub status: ConditionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(
        default,
        rename = "lastTransitionTime",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_transition_time: Option<String>,
}

#[derive(
    Deserialize, Serialize, Clone, Copy, Debug, JsonSchema, PartialEq, Eq,
)]
#[serde(rename_all = "PascalCase")]
pub enum ConditionStatus {
    True,
    False,
    Unknown,
}

impl From<bool> for ConditionStatus {
    fn from(value: bool) -> Self {
        if value {
            ConditionStatus::True
        } else {
            ConditionStatus::False
        }
    }
}

/// Ordered condition list. Order is kept for serialization only.
#[derive(
    Deserialize, Serialize, Clone, Debug, JsonSchema, Default, PartialEq, Eq,
)]
#[serde(transparent)]
pub struct ConditionList(Vec<Condition>);

impl ConditionList {
    pub fn new(conditions: Vec<Condition>) -> Self {
        Self(conditions)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Condition> {
        self.0.iter()
    }

    pub fn get(&self, type_: &str) -> Option<&Condition> {
        self.0.iter().find(|c| c.type_ == type_)
    }

    pub fn is_true(&self, type_: &str) -> bool {
        self.get(type_)
            .is_some_and(|c| c.status == ConditionStatus::True)
    }

    pub(crate) fn as_mut_vec(&mut self) -> &mut Vec<Condition> {
        &mut self.0
    }
}

impl From<Vec<Condition>> for ConditionList {
    fn from(value: Vec<Condition>) -> Self {
        Self(value)
    }
}

#[derive(
    Deserialize, Serialize, Clone, Debug, JsonSchema, Default, PartialEq, Eq,
)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentSummary {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ready: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub starting: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stopped: Vec<String>,
}
