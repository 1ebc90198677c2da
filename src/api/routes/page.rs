use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::render::{rank_regions, Standing};
use crate::table::initialize;

/// Render the tournament page with a fresh snapshot.
///
/// Always succeeds: a failed load renders the error banner and the
/// placeholder row instead of the standings.
pub async fn render_page(State(state): State<AppState>) -> Html<String> {
    let mut doc = (*state.template).clone();
    initialize(&mut doc, &state.loader).await;
    Html(doc.to_html())
}

#[derive(Debug, Serialize)]
pub struct StandingsResponse<'a> {
    pub standings: Vec<Standing<'a>>,
}

/// Ranked standings as JSON. Serialized before returning since the
/// standings borrow the freshly loaded snapshot.
pub async fn standings(State(state): State<AppState>) -> Result<Response, ApiError> {
    let snapshot = state
        .loader
        .load()
        .await
        .map_err(|e| ApiError::Upstream(e.to_string()))?;

    let regions = snapshot.regions.unwrap_or_default();
    let body = StandingsResponse {
        standings: rank_regions(&regions),
    };

    Ok(Json(body).into_response())
}
