use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::delivery::presenter::{present, CategoryStyle, NotificationView};
use crate::domain::filter::{ListOrder, NotificationFilter};
use crate::domain::notification::{Notification, NotificationCategory};
use crate::usecase::error::UsecaseError;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct NotificationListParams {
    pub category: Option<String>,
    pub read: Option<bool>,
    pub sort: Option<String>,
}

impl NotificationListParams {
    fn to_query(&self) -> Result<(NotificationFilter, ListOrder), UsecaseError> {
        let category = self
            .category
            .as_deref()
            .map(str::parse::<NotificationCategory>)
            .transpose()
            .map_err(|e| UsecaseError::Validation(e.to_string()))?;

        let order = self
            .sort
            .as_deref()
            .map(str::parse::<ListOrder>)
            .transpose()
            .map_err(UsecaseError::Validation)?
            .unwrap_or_default();

        Ok((NotificationFilter { category, read: self.read }, order))
    }
}

/// Path segments under `/api/v1/notifications` that are routes of their own.
pub const RESERVED_IDS: [&str; 4] = ["read-all", "unread-count", "styles", "preferences"];

fn validate_notification_id(id: &str) -> Result<(), ValidationError> {
    if id.contains('/') {
        return Err(ValidationError::new("id_contains_slash"));
    }
    if RESERVED_IDS.contains(&id) {
        return Err(ValidationError::new("id_reserved"));
    }
    Ok(())
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateNotificationRequest {
    #[validate(length(min = 1, max = 128), custom(function = "validate_notification_id"))]
    pub id: Option<String>,
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub title: String,
    #[validate(length(min = 1, max = 2000), custom(function = "validate_not_blank"))]
    pub message: String,
    pub category: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl CreateNotificationRequest {
    fn into_notification(self) -> Result<Notification, UsecaseError> {
        let category = self
            .category
            .parse::<NotificationCategory>()
            .map_err(|e| UsecaseError::Validation(e.to_string()))?;

        let notification = match self.id {
            Some(id) => Notification::new(
                id,
                self.title,
                self.message,
                category,
                self.created_at.unwrap_or_else(Utc::now),
            ),
            None => {
                let mut generated = Notification::generate(self.title, self.message, category);
                if let Some(created_at) = self.created_at {
                    generated.created_at = created_at;
                }
                generated
            }
        };

        Ok(notification)
    }
}

#[derive(Serialize)]
pub struct NotificationsListResponse {
    pub notifications: Vec<NotificationView>,
    pub unread_count: usize,
}

#[derive(Serialize)]
pub struct UnreadCountResponse {
    pub unread_count: usize,
}

#[derive(Serialize)]
pub struct MarkAllReadResponse {
    pub updated: usize,
}

#[tracing::instrument(skip(state))]
pub async fn list_notifications(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NotificationListParams>,
) -> Result<impl IntoResponse, UsecaseError> {
    tracing::debug!("handling list notifications request");

    let (filter, order) = params.to_query()?;
    let (notifications, unread_count) = state.notifications_usecase.snapshot(filter, order).await;

    let now = Utc::now();
    let response: Vec<NotificationView> = notifications.iter().map(|n| present(n, now)).collect();

    tracing::debug!(count = response.len(), unread_count, "notifications listed");
    Ok((StatusCode::OK, Json(NotificationsListResponse { notifications: response, unread_count })))
}

#[tracing::instrument(skip(state))]
pub async fn get_unread_count(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let unread_count = state.notifications_usecase.count_unread().await;

    tracing::debug!(unread_count, "unread count retrieved");
    (StatusCode::OK, Json(UnreadCountResponse { unread_count }))
}

#[tracing::instrument(skip(state), fields(notification_id = %id))]
pub async fn get_notification(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, UsecaseError> {
    let notification = state.notifications_usecase.get_notification(&id).await?;
    Ok((StatusCode::OK, Json(present(&notification, Utc::now()))))
}

/// Style lookup for raw kind names the UI receives from other sources.
#[tracing::instrument]
pub async fn get_category_style(Path(kind): Path<String>) -> impl IntoResponse {
    (StatusCode::OK, Json(CategoryStyle::for_kind(&kind)))
}

#[tracing::instrument(skip(state, payload))]
pub async fn create_notification(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateNotificationRequest>,
) -> Result<impl IntoResponse, UsecaseError> {
    tracing::debug!("handling create notification request");

    if let Err(validation_errors) = payload.validate() {
        tracing::warn!(?validation_errors, "validation failed");
        metrics::counter!("notifications_rejected_total", "reason" => "validation").increment(1);
        return Err(UsecaseError::Validation(format!("{:?}", validation_errors)));
    }

    let notification = payload.into_notification().inspect_err(|_| {
        metrics::counter!("notifications_rejected_total", "reason" => "category").increment(1);
    })?;
    let category = notification.category;

    let (stored, unread_count) = state
        .notifications_usecase
        .add_notification(notification)
        .await
        .inspect_err(|e| match e {
            UsecaseError::Conflict(_) => {
                metrics::counter!("notifications_rejected_total", "reason" => "duplicate").increment(1);
            }
            UsecaseError::Forbidden(_) => {
                metrics::counter!("notifications_rejected_total", "reason" => "muted").increment(1);
            }
            _ => {}
        })?;

    metrics::counter!("notifications_added_total", "category" => category.as_str()).increment(1);

    tracing::info!(notification_id = %stored.id, %category, unread_count, "notification created");
    Ok((StatusCode::CREATED, Json(present(&stored, Utc::now()))))
}

#[tracing::instrument(skip(state), fields(notification_id = %id))]
pub async fn mark_as_read(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, UsecaseError> {
    tracing::debug!("marking notification as read");

    let (changed, _) = state.notifications_usecase.mark_as_read(&id).await?;
    if changed {
        metrics::counter!("notifications_marked_read_total").increment(1);
    }

    Ok(StatusCode::NO_CONTENT)
}

#[tracing::instrument(skip(state))]
pub async fn mark_all_as_read(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    tracing::debug!("marking all notifications as read");

    let (updated, _) = state.notifications_usecase.mark_all_as_read().await;
    metrics::counter!("notifications_marked_read_total").increment(updated as u64);

    tracing::debug!(updated, "all notifications marked as read");
    (StatusCode::OK, Json(MarkAllReadResponse { updated }))
}

#[tracing::instrument(skip(state), fields(notification_id = %id))]
pub async fn remove_notification(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, UsecaseError> {
    tracing::debug!("removing notification");

    state.notifications_usecase.remove_notification(&id).await?;
    metrics::counter!("notifications_removed_total").increment(1);

    Ok(StatusCode::NO_CONTENT)
}
