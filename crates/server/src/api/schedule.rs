use crate::{
    dto::{ApiError, RecalculateRequest},
    state::AppState,
};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{info, warn};

pub async fn recalculate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RecalculateRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload.inspect_err(|err| warn!("Undecodable route: {err}"))?;
    let config = request.config.unwrap_or(state.schedule);
    let result = sleighline::schedule::recalculate(&request.nodes, &config).map_err(|err| {
        warn!("Rejected route of {} nodes: {err}", request.nodes.len());
        ApiError::unprocessable(err.to_string())
    })?;
    info!("Recalculated route of {} nodes", result.nodes.len());
    Ok(Json(result).into_response())
}
