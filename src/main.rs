mod agent;
mod agent_runtime;
mod config;
mod handlers;
mod routes;
mod state;
mod tools;

use anyhow::Result;
use axum::Router;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "cronos_agent_backend=debug,tower_http=debug".to_string()),
        )
        .init();

    let config = Config::from_env()?;
    info!(
        agent_base_url = %config.credentials.agent_base_url,
        bot_token_present = config.credentials.bot_token.is_some(),
        "Loaded configuration"
    );

    let app_state = AppState::new(config.clone());

    let app = Router::new()
        .merge(routes::create_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let addr: SocketAddr = format!("{}:{}", config.system.host, config.system.port).parse()?;
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
