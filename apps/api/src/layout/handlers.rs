//! Axum route handlers for the Layout API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::layout::{compute_spacing, FragmentBox, PageGeometry, PaginationOutcome};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PaginateRequest {
    pub fragments: Vec<FragmentBox>,
}

/// GET /api/v1/layout/geometry
pub async fn handle_geometry(State(state): State<AppState>) -> Json<PageGeometry> {
    Json(state.geometry)
}

/// POST /api/v1/layout/paginate
///
/// Takes measured fragment boxes in document order (offsets measured with no extra spacing)
/// and returns the top spacing each fragment needs so none straddles a page boundary.
pub async fn handle_paginate(
    State(state): State<AppState>,
    Json(request): Json<PaginateRequest>,
) -> Json<PaginationOutcome> {
    let outcome = compute_spacing(&request.fragments, &state.geometry);
    tracing::debug!(
        "Paginated {} fragments: pages={}, pushed={}",
        request.fragments.len(),
        outcome.page_count,
        outcome.pushed
    );
    Json(outcome)
}
