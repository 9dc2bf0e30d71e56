use crate::dto::{ApiError, AuditRequest};
use axum::{Json, extract::rejection::JsonRejection};
use sleighline::route::audit::{AuditReport, audit as audit_route};
use tracing::{debug, warn};

pub async fn audit(
    payload: Result<Json<AuditRequest>, JsonRejection>,
) -> Result<Json<AuditReport>, ApiError> {
    let Json(request) = payload.inspect_err(|err| warn!("Undecodable route: {err}"))?;
    let report = audit_route(&request.nodes);
    debug!(
        "Audited {} nodes: {} errors, {} warnings",
        report.total_locations,
        report.errors.len(),
        report.warnings.len()
    );
    Ok(Json(report))
}
