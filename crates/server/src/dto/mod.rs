use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sleighline::{
    route::RouteNode,
    schedule::ScheduleConfig,
    simulation::{RouteSummary, Snapshot},
};

#[derive(Debug, Deserialize)]
pub struct RecalculateRequest {
    pub nodes: Vec<RouteNode>,
    pub config: Option<ScheduleConfig>,
}

#[derive(Debug, Deserialize)]
pub struct SimulateRequest {
    pub nodes: Vec<RouteNode>,
    pub at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct SimulateResponse {
    pub at: DateTime<Utc>,
    pub snapshot: Snapshot,
    pub summary: RouteSummary,
}

#[derive(Debug, Deserialize)]
pub struct AuditRequest {
    pub nodes: Vec<RouteNode>,
}

#[derive(Debug, Serialize)]
pub struct ErrorDto {
    pub message: String,
}

pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: message.into(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorDto {
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
