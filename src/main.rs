use inception_dashboard::api::{DashboardApi, HttpApi};
use inception_dashboard::chat::ChatSession;
use inception_dashboard::messages::MessageCatalog;
use inception_dashboard::notifier::Notifier;
use inception_dashboard::poller::Poller;
use inception_dashboard::{AppState, Config, View, router};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env()?;
    let messages = Arc::new(match &config.messages_path {
        Some(path) => MessageCatalog::load(path).await,
        None => MessageCatalog::default(),
    });

    let view = View::mount()?.shared();
    let api: Arc<dyn DashboardApi> = Arc::new(HttpApi::new(&config.api_url));
    let notifier = Notifier::new(view.clone(), config.notice_delay);
    let poller = Arc::new(
        Poller::new(api.clone(), view.clone(), notifier, messages.clone())
            .with_intervals(config.intervals),
    );
    let chat = Arc::new(ChatSession::new(api, view.clone(), messages));

    let mut scheduler = poller.start();
    info!(backend = %config.api_url, "dashboard mounted");

    let state = AppState::new(view, poller, chat, config.intervals.refresh.as_secs());
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    scheduler.shutdown();
    info!("dashboard unmounted");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
}
