mod audit;
mod schedule;
mod simulation;

pub use audit::*;
pub use schedule::*;
pub use simulation::*;

use crate::state::AppState;
use axum::{Router, routing::post};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/recalculate", post(recalculate))
        .route("/simulate", post(simulate))
        .route("/audit", post(audit))
}
