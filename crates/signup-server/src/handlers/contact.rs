//! Contact (demo request) handlers

use super::ApiError;
use crate::validation::ContactRequest;
use crate::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;
use signup_core::ContactSubmission;
use tracing::{error, info, warn};

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    success: bool,
    contact: ContactSubmission,
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<ContactResponse>, ApiError> {
    let Json(req) = body.map_err(|e| {
        warn!("Contact form error: {}", e.body_text());
        ApiError::invalid_body(e.body_text())
    })?;

    let contact = req.validate().map_err(|result| {
        warn!("Contact form error: {}", result.message());
        ApiError::Validation(result)
    })?;

    let contact = state.store.create_contact(contact).await.map_err(|e| {
        error!("Failed to store contact: {}", e);
        ApiError::Submit(e)
    })?;

    info!("Demo requested: id={}, school={}", contact.id, contact.school);

    Ok(Json(ContactResponse {
        success: true,
        contact,
    }))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ContactSubmission>>, ApiError> {
    let contacts = state.store.list_contacts().await.map_err(|e| {
        error!("Get contacts error: {}", e);
        ApiError::Fetch {
            message: "Failed to fetch contacts",
            source: e,
        }
    })?;

    Ok(Json(contacts))
}
