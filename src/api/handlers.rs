use crate::api::AppState;
use crate::error::{AppError, Result};
use crate::models::{FilterOptions, GroupProfile, GroupSummary};
use crate::search::SearchRequest;
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

/// Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// List distinct filter values for the search controls
pub async fn filter_options(State(state): State<AppState>) -> Result<Json<FilterOptions>> {
    let engine = state.engine.clone();
    let options = run_blocking(move || engine.filter_options()).await?;
    Ok(Json(options))
}

/// Run a filtered group search
pub async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<Vec<GroupSummary>>> {
    let engine = state.engine.clone();
    let groups = run_blocking(move || engine.search(&request)).await?;

    tracing::debug!(results = groups.len(), "Search completed");
    Ok(Json(groups))
}

/// Fetch the detail payload for one group, or 404
pub async fn group_detail(
    State(state): State<AppState>,
    Path(group_id): Path<i64>,
) -> Result<Json<GroupProfile>> {
    let profiles = state.profiles.clone();
    let profile = run_blocking(move || profiles.group_profile(group_id)).await?;
    Ok(Json(profile))
}

/// Run blocking SQLite work off the async runtime
async fn run_blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::Internal(format!("blocking task failed: {e}")))?
}
