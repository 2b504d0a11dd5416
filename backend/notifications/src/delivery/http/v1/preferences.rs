use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::domain::preferences::NotificationPreferences;
use crate::AppState;

#[tracing::instrument(skip(state))]
pub async fn get_preferences(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    tracing::debug!("getting notification preferences");

    let preferences = state.notifications_usecase.get_preferences().await;
    (StatusCode::OK, Json(preferences))
}

/// Replaces the preferences. Omitted fields take their default value.
#[tracing::instrument(skip(state, body))]
pub async fn update_preferences(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NotificationPreferences>,
) -> impl IntoResponse {
    tracing::debug!(?body, "setting notification preferences");

    let preferences = state.notifications_usecase.update_preferences(body).await;

    tracing::info!(enabled = preferences.enabled, "notification preferences updated");
    (StatusCode::OK, Json(preferences))
}
