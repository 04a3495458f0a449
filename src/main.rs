use expense_tracker::{
    config::{self, database},
    controller::LedgerSettings,
    errors::Result,
    identity::LocalAnonymousAuth,
    storage::SqliteExpenseStore,
    web::{self, SessionRegistry, registry::spawn_idle_sweeper},
};
use dotenvy::dotenv;
use std::{sync::Arc, time::Duration};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the main application configuration
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Critical error loading application configuration: {}", e))?;
    info!(app_id = %app_config.app_id, "Successfully processed application configuration.");

    // 4. Initialize database
    let db = database::create_connection()
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 5. Wire the store, identity provider and session registry
    let store = Arc::new(SqliteExpenseStore::new(db.clone()));
    let identity = Arc::new(LocalAnonymousAuth::new(db));
    let registry = Arc::new(SessionRegistry::new(
        store,
        identity,
        LedgerSettings {
            app_id: app_config.app_id.clone(),
            budget: app_config.default_budget,
        },
    ));

    // 6. Stop ledgers of pages nobody has used for a while
    let max_idle = Duration::from_secs(app_config.session_idle_secs);
    let _sweeper = spawn_idle_sweeper(&registry, max_idle.min(SWEEP_INTERVAL), max_idle);

    // 7. Serve the page
    web::run_server(&app_config.bind_address, registry)
        .await
        .inspect_err(|e| error!("Server stopped: {}", e))?;

    Ok(())
}
