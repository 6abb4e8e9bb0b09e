mod config;
mod db;
mod errors;
mod listing;
mod llm_client;
mod models;
mod project;
mod proposal;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::listing::ListingFetcher;
use crate::llm_client::GenerationClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::PgStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting PitchBot API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (runs migrations)
    let db = create_pool(&config.database_url).await?;
    let store = Arc::new(PgStore::new(db));

    // Initialize generation client
    let credentials = config.credential_chain();
    if credentials.process_default.is_none() {
        warn!("OPENAI_API_KEY is not set; requests must carry their own apiKey unless DEFAULT_OPENAI_API_KEY is set");
    }
    let llm = GenerationClient::connect(
        &config.openai_base_url,
        config.llm_timeout,
        config.openai_api_style,
        credentials.resolve(None),
    )
    .await?;
    info!(
        "Generation client initialized ({:?} API at {})",
        llm.style(),
        config.openai_base_url
    );
    info!("Proposals will be signed by {}", config.proposal_author);

    // Initialize listing fetcher
    let listings = ListingFetcher::new(
        config.listing_site_domain.clone(),
        &config.listing_user_agent,
        config.listing_fetch_timeout,
    )?;
    info!("Listing extraction restricted to {}", listings.site_domain());

    let state = AppState {
        proposals: store.clone(),
        projects: store,
        llm,
        credentials,
        listings,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
