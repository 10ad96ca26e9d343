use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use syncwatch::{
    config::Config,
    error::AppErr,
    relay::Relay,
    routes,
    state::{MediaLog, SessionRegistry},
    utils::clean,
};

#[tokio::main]
async fn main() -> Result<(), AppErr> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("syncwatch=info,tower_http=info")),
        )
        .init();

    let cfg = Config::from_env()?;
    let rooms = Arc::new(SessionRegistry::default());
    let media = MediaLog::default();

    tokio::spawn(clean::task(media.clone(), cfg.upload_disk_cap, cfg.clean_interval));  // upload sweeper

    let relay = Relay::new(rooms);
    let app = routes::app(&cfg, relay.clone(), media);

    let listener = tokio::net::TcpListener::bind(cfg.socket_addr()?).await?;
    info!(addr = %listener.local_addr()?, "syncwatch listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown(relay))
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown(relay: Relay) {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };
    #[cfg(unix)]
    let term = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut s) => { s.recv().await; }
            Err(_) => std::future::pending::<()>().await,
        }
    };
    #[cfg(not(unix))]
    let term = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = term => {},
    }
    info!("shutting down, closing rooms");
    relay.close();
}
