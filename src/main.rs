use std::net::SocketAddr;
use tokio::fs;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};
use water_log::{config, load_log, router, AppState, FileStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let store = FileStore::new(config::resolve_data_dir());
    fs::create_dir_all(store.dir()).await?;

    let log = load_log(&store).await;
    info!(entries = log.len(), dir = %store.dir().display(), "loaded water log");

    let app = router(AppState::new(store, log));

    let addr = SocketAddr::from(([0, 0, 0, 0], config::resolve_port()));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
