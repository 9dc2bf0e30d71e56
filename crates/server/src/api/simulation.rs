use crate::dto::{ApiError, SimulateRequest, SimulateResponse};
use axum::{Json, extract::rejection::JsonRejection};
use chrono::Utc;
use sleighline::simulation::{simulate_at, summarize};
use tracing::warn;

pub async fn simulate(
    payload: Result<Json<SimulateRequest>, JsonRejection>,
) -> Result<Json<SimulateResponse>, ApiError> {
    let Json(request) = payload.inspect_err(|err| warn!("Undecodable route: {err}"))?;
    let at = request.at.unwrap_or_else(Utc::now);
    Ok(Json(SimulateResponse {
        at,
        snapshot: simulate_at(&request.nodes, at),
        summary: summarize(&request.nodes),
    }))
}
