//! Newsletter subscription handlers

use super::ApiError;
use crate::validation::NewsletterRequest;
use crate::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;
use signup_core::NewsletterSubscription;
use tracing::{error, info, warn};

#[derive(Debug, Serialize)]
pub struct NewsletterResponse {
    success: bool,
    newsletter: NewsletterSubscription,
}

pub async fn subscribe(
    State(state): State<AppState>,
    body: Result<Json<NewsletterRequest>, JsonRejection>,
) -> Result<Json<NewsletterResponse>, ApiError> {
    let Json(req) = body.map_err(|e| {
        warn!("Newsletter subscription error: {}", e.body_text());
        ApiError::invalid_body(e.body_text())
    })?;

    let subscription = req.validate().map_err(|result| {
        warn!("Newsletter subscription error: {}", result.message());
        ApiError::Validation(result)
    })?;

    let newsletter = state
        .store
        .subscribe_newsletter(subscription)
        .await
        .map_err(|e| {
            error!("Failed to store newsletter subscription: {}", e);
            ApiError::Submit(e)
        })?;

    info!("Newsletter subscription: id={}", newsletter.id);

    Ok(Json(NewsletterResponse {
        success: true,
        newsletter,
    }))
}

pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<NewsletterSubscription>>, ApiError> {
    let newsletters = state
        .store
        .list_newsletter_subscriptions()
        .await
        .map_err(|e| {
            error!("Get newsletters error: {}", e);
            ApiError::Fetch {
                message: "Failed to fetch newsletter subscriptions",
                source: e,
            }
        })?;

    Ok(Json(newsletters))
}
