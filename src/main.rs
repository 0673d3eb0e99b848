mod model;
mod server;

use std::net::SocketAddr;

use tokio::{net::TcpListener, signal};
use tracing_subscriber::{fmt, EnvFilter};

use crate::server::{
    config::Config, error::AppError, router, scheduler::expiry, startup, state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db).await?;
    let http_client = startup::setup_reqwest_client();

    let address = format!("{}:{}", config.host, config.port);
    let state = AppState::new(db, http_client, config);

    // Start expiry scheduler
    let scheduler_db = state.db.clone();
    let scheduler_storage = state.storage.clone();
    tokio::spawn(async move {
        if let Err(e) = expiry::start_scheduler(scheduler_db, scheduler_storage).await {
            tracing::error!("Expiry scheduler error: {}", e);
        }
    });

    let app = router::router(state, session)?;

    let listener = TcpListener::bind(&address).await?;
    tracing::info!("Server listening on {}", address);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
