mod brief;
mod config;
mod errors;
mod llm_client;
mod models;
mod render;
mod routes;
mod scraper;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::OpenAiClient;
use crate::render::pdf::WkhtmltopdfConverter;
use crate::routes::build_router;
use crate::scraper::ApifyPlacesClient;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.rust_log)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Sleft Signals API v{}", env!("CARGO_PKG_VERSION"));

    // External clients
    let llm = OpenAiClient::new(config.openai_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let places = ApifyPlacesClient::new(config.apify_token.clone(), config.apify_task_id.clone());
    info!("Places scraper client initialized (task: {})", config.apify_task_id);

    let pdf = WkhtmltopdfConverter::new(config.wkhtmltopdf_bin.clone());

    // Build app state
    let state = AppState {
        llm: Arc::new(llm),
        places: Arc::new(places),
        pdf: Arc::new(pdf),
        config: config.clone(),
        latest_brief: Arc::new(RwLock::new(None)),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
