pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::ats::handlers as ats;
use crate::layout::handlers as layout;
use crate::refine::handlers as refine;
use crate::state::AppState;
use crate::storage::handlers as storage;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // ATS
        .route("/api/v1/ats/report", post(ats::handle_ats_report))
        .route("/api/v1/ats/keywords", post(ats::handle_keywords))
        // Layout
        .route("/api/v1/layout/geometry", get(layout::handle_geometry))
        .route("/api/v1/layout/paginate", post(layout::handle_paginate))
        // Stored resume + preferences
        .route(
            "/api/v1/resume",
            get(storage::handle_get_resume)
                .put(storage::handle_put_resume)
                .delete(storage::handle_reset),
        )
        .route(
            "/api/v1/config",
            get(storage::handle_get_config).put(storage::handle_put_config),
        )
        // AI refine
        .route("/api/v1/refine", post(refine::handle_refine))
        .with_state(state)
}
