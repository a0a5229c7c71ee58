use chain_ledger_service::{api, config::Config, db, report::StdoutReporter, scheduler};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting chain-ledger-service");

    // Load configuration
    let config = Config::from_env()?;
    info!(network = %config.network, iterations = config.iterations,
          "Configuration loaded");

    // Setup database connection
    let db_pool = db::connection::establish_connection(&config.database_url).await?;
    info!("Database connection established");

    // API client owns the credential rotator and the request counter
    let mut client = api::ApiClient::new(&config)?;

    let result = scheduler::run(&mut client, &db_pool, &config, &StdoutReporter).await;
    info!(requests = client.request_count(), "Total upstream requests sent");

    match result {
        Ok(state) => {
            info!(?state, "Ingestion finished");
            Ok(())
        }
        Err(e) => {
            // Fatal crawl failure or full credential exhaustion; exit
            // non-zero so the supervisor sees the abort.
            error!(error = %e, "Ingestion aborted");
            Err(e.into())
        }
    }
}
