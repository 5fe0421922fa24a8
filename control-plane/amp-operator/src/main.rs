use amp_operator::{config::OperatorConfig, controller, init_tracing};
use envconfig::Envconfig;
use kube::Client;
use tracing::info;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let cfg = OperatorConfig::init_from_env()?;
    init_tracing(&cfg.log);

    // kube's rustls feature needs a process-wide crypto provider.
    if let Err(e) = rustls::crypto::CryptoProvider::install_default(
        rustls::crypto::aws_lc_rs::default_provider(),
    ) {
        tracing::debug!(
            ?e,
            "CryptoProvider already installed or incompatible; proceeding"
        );
    }

    info!(?cfg, "Starting amp-operator");

    let client = Client::try_default().await?;
    controller::run_controller(client, cfg).await
}
