mod ats;
mod config;
mod errors;
mod layout;
mod llm_client;
mod models;
mod refine;
mod routes;
mod state;
mod storage;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::layout::PageGeometry;
use crate::llm_client::GeminiClient;
use crate::refine::refiner::RefineCoordinator;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::ResumeStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    // Local JSON store
    let store = ResumeStore::new(&config.data_dir);
    info!("Resume store at {}", store.dir().display());

    // Model backend (GeminiClient by default; the model is resolved per key on first use)
    let gemini = GeminiClient::new(config.gemini_model.clone())?;
    match &config.gemini_model {
        Some(model) => info!("Gemini client initialized (pinned model: {model})"),
        None => info!("Gemini client initialized (model auto-selected per key)"),
    }
    if config.gemini_api_key.is_none() {
        info!("GEMINI_API_KEY not set; refine requests must carry their own key");
    }

    let geometry = PageGeometry::a4();
    info!(
        "Page geometry: {}px pages, {}px gap, {}px stride, {}px top margin, {}px bottom buffer",
        geometry.page_height_px(),
        geometry.gap_px(),
        geometry.visual_page_stride_px(),
        geometry.top_margin_px(),
        geometry.bottom_buffer_px()
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        store,
        refiner: Arc::new(gemini),
        refine_jobs: Arc::new(RefineCoordinator::new()),
        geometry,
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
