pub mod api; // HTTP surface
pub mod catalog; // Symptom taxonomy + condition catalog
pub mod config;
pub mod core_state; // Shared state + intake registry
pub mod intake; // Search → Refine → Analyze flow
pub mod models;
pub mod triage; // Crisis-first matching engine

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

/// How often abandoned intakes are swept when no request touches them.
const PURGE_INTERVAL: Duration = Duration::from_secs(60);

/// Run the intake server until Ctrl-C.
pub async fn run() -> Result<(), String> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let server_config = config::ServerConfig::from_env();
    let bind_addr = server_config.bind_addr;
    let core = Arc::new(core_state::CoreState::new(server_config));
    tracing::info!(
        symptoms = core.catalog().symptoms().len(),
        conditions = core.catalog().conditions().len(),
        "Catalog loaded"
    );

    let mut server = api::start_api_server_on(core.clone(), bind_addr).await?;

    let sweeper = tokio::spawn(purge_idle_intakes(core));

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }

    sweeper.abort();
    server.shutdown();
    server.join().await;
    Ok(())
}

async fn purge_idle_intakes(core: Arc<core_state::CoreState>) {
    let mut interval = tokio::time::interval(PURGE_INTERVAL);
    loop {
        interval.tick().await;
        if let Err(e) = core.purge_idle() {
            tracing::warn!("Idle intake sweep failed: {e}");
        }
    }
}
