//! Application state shared across all request handlers.
//!
//! The state is initialized once during startup and then cloned for each request
//! handler through Axum's state extraction. It holds:
//! - Database connection pool for data persistence
//! - HTTP client for the mail relay, the push service and the PDF renderer
//! - Application configuration (URLs, expiry durations, minimum driver age)
//! - Mail and push transports used for user notifications
//! - File storage rooted at the CDN folder

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::{
    config::Config,
    service::{mail::Mailer, push::PushService, storage::FileStorage},
};

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone: the connection pool and `reqwest::Client` share
/// their internals, the configuration sits behind an `Arc`, and the transports only
/// hold clients, paths and shared handles.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// HTTP client for outgoing requests, configured without redirects.
    pub http_client: reqwest::Client,

    /// Environment configuration loaded at startup.
    pub config: Arc<Config>,

    /// Outgoing mail transport.
    pub mailer: Mailer,

    /// Mobile push transport.
    pub push: PushService,

    /// Uploaded and generated files.
    pub storage: FileStorage,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// The mailer, push service and file storage are derived from the configuration.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `http_client` - HTTP client for external requests
    /// - `config` - Application configuration
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(db: DatabaseConnection, http_client: reqwest::Client, config: Config) -> Self {
        let mailer = match &config.mail {
            Some(mail) => Mailer::http(http_client.clone(), mail.clone()),
            None => Mailer::Log,
        };
        let push = PushService::new(http_client.clone(), config.expo_access_token.clone());
        let storage = FileStorage::new(config.cdn_root.clone());

        Self {
            db,
            http_client,
            config: Arc::new(config),
            mailer,
            push,
            storage,
        }
    }
}
