//! JSON HTTP API.
//!
//! Every handler receives its state and caller explicitly: the shared
//! [`AppState`] holds only the store handle and collaborators, and the
//! logged-in user arrives as a [`CurrentUser`] extracted per request.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::routing::{get, post};
use axum::Router;
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::config::AppConfig;
use crate::services::auth::{CredentialVerifier, SaltedSha256Verifier};
use crate::services::database::Database;
use crate::utils::date::{Clock, SystemClock};

mod context;
mod error;
mod extract;
mod handlers;

pub use context::CurrentUser;
pub use error::ApiError;
pub use extract::{ApiJson, ApiPath};

/// Shared handles every request needs.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Database>>,
    clock: Arc<dyn Clock>,
    verifier: Arc<dyn CredentialVerifier>,
    timezone: Tz,
    session_ttl: Duration,
}

impl AppState {
    pub fn new(db: Database, config: &AppConfig) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            clock: Arc::new(SystemClock),
            verifier: Arc::new(SaltedSha256Verifier),
            timezone: config.timezone,
            session_ttl: config.session_ttl(),
        }
    }

    /// Replace the wall clock, e.g. with a `FixedClock` in tests.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_verifier(mut self, verifier: Arc<dyn CredentialVerifier>) -> Self {
        self.verifier = verifier;
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    pub(crate) fn verifier(&self) -> &dyn CredentialVerifier {
        self.verifier.as_ref()
    }

    /// Run one store operation under the connection lock.
    pub(crate) fn with_db<T>(
        &self,
        f: impl FnOnce(&Database) -> anyhow::Result<T>,
    ) -> Result<T, ApiError> {
        let db = self
            .db
            .lock()
            .map_err(|_| ApiError::Internal(anyhow::anyhow!("database lock poisoned")))?;
        f(&db).map_err(ApiError::from)
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/logout", post(handlers::logout))
        .route("/dashboard", get(handlers::dashboard))
        .route("/tasks", get(handlers::list_tasks).post(handlers::create_task))
        .route("/tasks/{id}/complete", post(handlers::complete_task))
        .with_state(state)
}

/// Bind to `addr` and serve in a background task.
///
/// Returns the actual bound address (useful with port 0) and the server's
/// join handle.
pub async fn start_server(
    addr: &str,
    state: AppState,
) -> std::io::Result<(SocketAddr, JoinHandle<std::io::Result<()>>)> {
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    let app = router(state);

    let handle = tokio::spawn(async move { axum::serve(listener, app).await });
    Ok((local_addr, handle))
}
