use addressbook::infrastructure::config::AppConfig;
use addressbook::infrastructure::db;
use addressbook::infrastructure::state::AppState;
use addressbook::presentation;

use dotenvy::dotenv;
use std::env;
use std::future::Future;
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Ignore the error: tests may initialise a subscriber first
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "addressbook=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    let config = AppConfig::from_env()?;
    run(config, shutdown_signal()).await
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}

async fn run<F>(config: AppConfig, shutdown_signal: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (listener, app) = bootstrap(config).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    Ok(())
}

async fn bootstrap(config: AppConfig) -> anyhow::Result<(tokio::net::TcpListener, axum::Router)> {
    let pool = db::create_pool(&config.database).await?;

    // Run migrations
    sqlx::migrate!().run(&pool).await?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = AppState::postgres(config, pool)?;
    let app = presentation::router::app(state)?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    Ok((listener, app))
}
