// HTTP request handlers
use crate::application::storm_repository::StormNotFound;
use crate::domain::error::TrackError;
use crate::domain::storm::{Basin, FIRST_SEASON};
use crate::infrastructure::http_response::{accepts_brotli, error_response, json_response};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
pub struct BasinInfo {
    pub code: &'static str,
    pub name: &'static str,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List the supported basins
pub async fn list_basins(headers: HeaderMap) -> Response {
    let basins: Vec<BasinInfo> = Basin::ALL
        .iter()
        .map(|b| BasinInfo {
            code: b.code(),
            name: b.display_name(),
        })
        .collect();
    into_response(json_response(&basins, accepts_brotli(&headers)).await)
}

/// List storms of a basin and season
pub async fn list_storms(
    Path((basin, season)): Path<(String, i32)>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let basin = match parse_selection(&basin, season) {
        Ok(basin) => basin,
        Err(response) => return response,
    };

    match state.storm_service.list_storms(basin, season).await {
        Ok(storms) => into_response(json_response(&storms, accepts_brotli(&headers)).await),
        Err(e) => {
            tracing::error!("Error listing storms for {} {}: {:#}", basin, season, e);
            failure_response(&e)
        }
    }
}

/// Scene description for one storm
pub async fn storm_scene(
    Path((basin, season, storm_id)): Path<(String, i32, String)>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let basin = match parse_selection(&basin, season) {
        Ok(basin) => basin,
        Err(response) => return response,
    };

    match state.plot_service.plot_storm(basin, season, &storm_id).await {
        Ok(plotted) => into_response(json_response(&plotted.scene, accepts_brotli(&headers)).await),
        Err(e) => {
            tracing::warn!("Could not plot {} ({} {}): {:#}", storm_id, basin, season, e);
            failure_response(&e)
        }
    }
}

fn parse_selection(basin: &str, season: i32) -> Result<Basin, Response> {
    let basin = basin
        .parse::<Basin>()
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, &e.to_string()))?;
    if season < FIRST_SEASON {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            &format!("season must be {} or later", FIRST_SEASON),
        ));
    }
    Ok(basin)
}

/// Status for a failed use case: track-level errors are "no plottable
/// data", anything else came from the fetch collaborator.
fn status_for(err: &anyhow::Error) -> (StatusCode, String) {
    if let Some(track_error) = err.downcast_ref::<TrackError>() {
        if track_error.is_unplottable() {
            return (StatusCode::UNPROCESSABLE_ENTITY, format!("no plottable data: {}", track_error));
        }
    }
    if let Some(not_found) = err.downcast_ref::<StormNotFound>() {
        return (StatusCode::NOT_FOUND, not_found.to_string());
    }
    (StatusCode::BAD_GATEWAY, "best-track data is unavailable".to_string())
}

fn failure_response(err: &anyhow::Error) -> Response {
    let (status, message) = status_for(err);
    error_response(status, &message)
}

fn into_response(result: Result<Response, StatusCode>) -> Response {
    match result {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}
