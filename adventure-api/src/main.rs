use std::sync::Arc;
use std::net::SocketAddr;
use adventure_api::{app, AppState};
use adventure_core::SuggestionService;
use adventure_infra::{Config, GeminiClient};
use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional, real environment variables win
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "adventure_api=debug,adventure_core=debug,adventure_infra=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!(model = %config.model.name, "Starting adventure API on port {}", config.server.port);

    let gemini = GeminiClient::new(&config.model).context("Failed to create Gemini client")?;
    let service = SuggestionService::new(Arc::new(gemini), config.extraction.clone());

    let app = app(AppState::new(service));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
