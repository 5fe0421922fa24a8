use std::fmt;

use crate::crd::api_manager::ApiManagerSpec;

use super::ReconcileErr;

pub const APICAST_STAGING: &str = "apicast-staging";
pub const APICAST_PRODUCTION: &str = "apicast-production";
pub const BACKEND_LISTENER: &str = "backend-listener";
pub const BACKEND_WORKER: &str = "backend-worker";
pub const BACKEND_CRON: &str = "backend-cron";
pub const BACKEND_REDIS: &str = "backend-redis";
pub const SYSTEM_MEMCACHE: &str = "system-memcache";
pub const SYSTEM_APP: &str = "system-app";
pub const SYSTEM_SIDEKIQ: &str = "system-sidekiq";
pub const SYSTEM_SEARCHD: &str = "system-searchd";
pub const SYSTEM_MYSQL: &str = "system-mysql";
pub const SYSTEM_POSTGRESQL: &str = "system-postgresql";
pub const SYSTEM_REDIS: &str = "system-redis";
pub const ZYNC: &str = "zync";
pub const ZYNC_QUE: &str = "zync-que";
pub const ZYNC_DATABASE: &str = "zync-database";

const BASE_DEPLOYMENTS: [&str; 9] = [
    APICAST_STAGING,
    APICAST_PRODUCTION,
    BACKEND_LISTENER,
    BACKEND_WORKER,
    BACKEND_CRON,
    SYSTEM_MEMCACHE,
    SYSTEM_APP,
    SYSTEM_SIDEKIQ,
    SYSTEM_SEARCHD,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SystemDatabaseType {
    InternalMySql,
    InternalPostgreSql,
    External,
}

impl SystemDatabaseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SystemDatabaseType::InternalMySql => "internal-mysql",
            SystemDatabaseType::InternalPostgreSql => "internal-postgresql",
            SystemDatabaseType::External => "external",
        }
    }
}

impl fmt::Display for SystemDatabaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs that decide which deployments an instance runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeploymentFlags {
    pub system_database: SystemDatabaseType,
    /// backend-redis and system-redis are hosted outside the namespace
    pub external_redis: bool,
    pub external_zync_database: bool,
    pub zync_enabled: bool,
}

impl DeploymentFlags {
    pub fn from_spec(spec: &ApiManagerSpec) -> Result<Self, ReconcileErr> {
        let system_database = if spec.external_system_database() {
            SystemDatabaseType::External
        } else {
            match spec.system_database() {
                Some(db) if db.mysql.is_some() && db.postgresql.is_some() => {
                    return Err(ReconcileErr::Config(
                        "system database cannot be both mysql and postgresql"
                            .into(),
                    ));
                }
                Some(db) if db.postgresql.is_some() => {
                    SystemDatabaseType::InternalPostgreSql
                }
                _ => SystemDatabaseType::InternalMySql,
            }
        };
        Ok(Self {
            system_database,
            external_redis: spec.external_system_redis(),
            external_zync_database: spec.external_zync_database(),
            zync_enabled: spec.zync_enabled(),
        })
    }
}

/// Deployment names the flags call for, in display order. Pure: the fetch
/// path and the availability path both call it and must agree.
pub fn expected_deployment_names(flags: &DeploymentFlags) -> Vec<&'static str> {
    let mut names: Vec<&'static str> = BASE_DEPLOYMENTS.to_vec();

    if flags.zync_enabled {
        names.push(ZYNC);
        names.push(ZYNC_QUE);
    }

    match flags.system_database {
        SystemDatabaseType::InternalMySql => names.push(SYSTEM_MYSQL),
        SystemDatabaseType::InternalPostgreSql => names.push(SYSTEM_POSTGRESQL),
        SystemDatabaseType::External => {}
    }

    if !flags.external_redis {
        names.push(BACKEND_REDIS);
        names.push(SYSTEM_REDIS);
    }

    if flags.zync_enabled && !flags.external_zync_database {
        names.push(ZYNC_DATABASE);
    }

    names
}
