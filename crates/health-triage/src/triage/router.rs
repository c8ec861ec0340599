use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::error;

use super::appointments::{AppointmentId, AppointmentRepository, AppointmentSubmission};
use super::audit::TriageAuditLog;
use super::catalog::FacilityCatalog;
use super::request::{TriageRequest, ValidationError};
use super::service::{TriageService, TriageServiceError};

/// Router builder exposing the triage, booking, and lookup endpoints.
///
/// The unversioned `/api/triage` and `/api/appointments` paths are kept for
/// existing form clients. Request bodies are parsed as JSON whatever their
/// `Content-Type` header says.
pub fn triage_router<C, L, R>(service: Arc<TriageService<C, L, R>>) -> Router
where
    C: FacilityCatalog + 'static,
    L: TriageAuditLog + 'static,
    R: AppointmentRepository + 'static,
{
    Router::new()
        .route("/api/v1/triage", post(triage_handler::<C, L, R>))
        .route("/api/triage", post(triage_handler::<C, L, R>))
        .route("/api/v1/appointments", post(appointment_handler::<C, L, R>))
        .route("/api/appointments", post(appointment_handler::<C, L, R>))
        .route(
            "/api/v1/appointments/:appointment_id",
            get(appointment_status_handler::<C, L, R>),
        )
        .route("/api/v1/symptoms", get(symptoms_handler::<C, L, R>))
        .route("/api/v1/facilities", get(facilities_handler::<C, L, R>))
        .with_state(service)
}

pub(crate) async fn triage_handler<C, L, R>(
    State(service): State<Arc<TriageService<C, L, R>>>,
    body: Bytes,
) -> Response
where
    C: FacilityCatalog + 'static,
    L: TriageAuditLog + 'static,
    R: AppointmentRepository + 'static,
{
    let outcome = serde_json::from_slice::<Value>(&body)
        .map_err(|_| ValidationError::InvalidSymptoms)
        .and_then(|body| TriageRequest::from_json(&body))
        .map_err(TriageServiceError::from)
        .and_then(|request| service.triage(request));

    match outcome {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn appointment_handler<C, L, R>(
    State(service): State<Arc<TriageService<C, L, R>>>,
    body: Bytes,
) -> Response
where
    C: FacilityCatalog + 'static,
    L: TriageAuditLog + 'static,
    R: AppointmentRepository + 'static,
{
    let outcome = serde_json::from_slice::<AppointmentSubmission>(&body)
        .map_err(|_| TriageServiceError::from(ValidationError::MalformedBody))
        .and_then(|submission| service.book(submission));

    match outcome {
        Ok(confirmation) => (StatusCode::OK, Json(confirmation)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn appointment_status_handler<C, L, R>(
    State(service): State<Arc<TriageService<C, L, R>>>,
    Path(appointment_id): Path<String>,
) -> Response
where
    C: FacilityCatalog + 'static,
    L: TriageAuditLog + 'static,
    R: AppointmentRepository + 'static,
{
    match service.appointment(&AppointmentId(appointment_id)) {
        Ok(appointment) => (StatusCode::OK, Json(appointment)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn symptoms_handler<C, L, R>(
    State(service): State<Arc<TriageService<C, L, R>>>,
) -> Response
where
    C: FacilityCatalog + 'static,
    L: TriageAuditLog + 'static,
    R: AppointmentRepository + 'static,
{
    (StatusCode::OK, Json(service.symptoms())).into_response()
}

pub(crate) async fn facilities_handler<C, L, R>(
    State(service): State<Arc<TriageService<C, L, R>>>,
) -> Response
where
    C: FacilityCatalog + 'static,
    L: TriageAuditLog + 'static,
    R: AppointmentRepository + 'static,
{
    match service.facilities() {
        Ok(facilities) => (StatusCode::OK, Json(facilities)).into_response(),
        Err(err) => err.into_response(),
    }
}

impl IntoResponse for TriageServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            TriageServiceError::Validation(_) | TriageServiceError::Classification(_) => {
                StatusCode::BAD_REQUEST
            }
            TriageServiceError::FacilityNotFound(_) | TriageServiceError::AppointmentNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            TriageServiceError::Catalog(_) | TriageServiceError::Repository(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = match &self {
            TriageServiceError::Classification(_) => {
                ValidationError::InvalidSymptoms.to_string()
            }
            TriageServiceError::Catalog(_) | TriageServiceError::Repository(_) => {
                error!(error = %self, "request failed");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
