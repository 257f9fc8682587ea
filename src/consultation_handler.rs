use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::consultation;
use crate::errors::{AppError, ResultExt};
use crate::handlers::AppState;
use crate::mailer::OutgoingEmail;
use crate::models::{
    ConsultationResponse, ErrorResponse, RawConsultation, ValidationErrorResponse,
};
use crate::notification;

/// Consultation submission endpoint.
///
/// The single authoritative gate for the booking pipeline and the only place
/// allowed to invoke the mail transport. Re-validates the wire payload (the
/// client form runs the same schema, but is never trusted), renders the
/// operator notification, dispatches it, and answers exactly once.
#[utoipa::path(
    post,
    path = "/api/v1/consultations",
    request_body = RawConsultation,
    responses(
        (status = 200, description = "Notification dispatched", body = ConsultationResponse),
        (status = 400, description = "One or more fields invalid", body = ValidationErrorResponse),
        (status = 500, description = "Dispatch failed", body = ErrorResponse)
    )
)]
pub async fn submit_consultation(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RawConsultation>,
) -> Result<(StatusCode, Json<ConsultationResponse>), AppError> {
    tracing::info!("📨 Received consultation request");

    // 1. Authoritative validation, aggregating every failing field
    let request = consultation::validate(&payload).map_err(AppError::Validation)?;

    // 2. Build the notification document
    let document = notification::render(&request);

    // 3. Dispatch to the operator inbox. Reply-to points back at the
    //    requester only when email is their chosen contact method.
    let email = OutgoingEmail {
        from: state.config.from_email.clone(),
        to: vec![state.config.consultation_email.clone()],
        subject: document.subject,
        html: document.html,
        reply_to: request.email().map(str::to_string),
    };

    let receipt = state
        .mailer
        .send(&email)
        .await
        .context("dispatching consultation notification")?;

    tracing::info!(
        "✓ Consultation request from {} dispatched as {}",
        request.name,
        receipt.id
    );

    Ok((
        StatusCode::OK,
        Json(ConsultationResponse {
            message: "Consultation request sent successfully".to_string(),
            id: Some(receipt.id),
        }),
    ))
}
