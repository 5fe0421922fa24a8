use std::time::Duration;

use envconfig::Envconfig;

#[derive(Envconfig, Clone, Debug)]
pub struct OperatorConfig {
    /// Restrict the controller to one namespace; empty watches all of them.
    /// Env: AMP_OPERATOR_WATCH_NAMESPACE
    #[envconfig(from = "AMP_OPERATOR_WATCH_NAMESPACE")]
    pub watch_namespace: Option<String>,

    /// Steady-state resync interval in seconds.
    #[envconfig(from = "AMP_OPERATOR_RESYNC_SECS", default = "300")]
    pub resync_secs: u64,

    /// Delay before retrying after a status write conflict.
    #[envconfig(from = "AMP_OPERATOR_CONFLICT_REQUEUE_SECS", default = "5")]
    pub conflict_requeue_secs: u64,

    #[envconfig(from = "AMP_OPERATOR_ERROR_REQUEUE_SECS", default = "30")]
    pub error_requeue_secs: u64,

    /// Default tracing directive; RUST_LOG directives still apply on top.
    #[envconfig(from = "AMP_OPERATOR_LOG", default = "info")]
    pub log: String,
}

impl OperatorConfig {
    pub fn watch_namespace(&self) -> Option<&str> {
        self.watch_namespace
            .as_deref()
            .map(str::trim)
            .filter(|ns| !ns.is_empty())
    }

    pub fn resync_interval(&self) -> Duration {
        Duration::from_secs(self.resync_secs)
    }

    pub fn conflict_requeue(&self) -> Duration {
        Duration::from_secs(self.conflict_requeue_secs)
    }

    pub fn error_requeue(&self) -> Duration {
        Duration::from_secs(self.error_requeue_secs)
    }
}
