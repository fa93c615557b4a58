// Task Reminder server
// Main entry point

use anyhow::{Context, Result};
use task_reminder::config::AppConfig;
use task_reminder::services::auth::SessionService;
use task_reminder::services::database::Database;
use task_reminder::web::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize logging; RUST_LOG overrides the configured level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    log::info!("Starting Task Reminder");

    if let Some(parent) = config.database_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let db = Database::new(&config.database_path)?;
    db.initialize_schema()?;
    log::info!("Using database at {}", config.database_path.display());

    let purged = SessionService::new(db.connection()).purge_expired(chrono::Utc::now())?;
    log::debug!("Removed {} stale sessions at startup", purged);

    let state = AppState::new(db, &config);
    let (addr, handle) = web::start_server(&config.bind_addr, state)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    log::info!("Listening on http://{} (deadlines read in {})", addr, config.timezone);

    tokio::select! {
        result = handle => {
            result.context("Server task panicked")?.context("Server stopped")?;
        }
        _ = tokio::signal::ctrl_c() => {
            log::info!("Shutting down");
        }
    }

    Ok(())
}
