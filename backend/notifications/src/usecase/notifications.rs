use tokio::sync::RwLock;

use crate::domain::filter::{ListOrder, NotificationFilter};
use crate::domain::notification::Notification;
use crate::domain::preferences::NotificationPreferences;
use crate::usecase::contracts::NotificationRepository;
use crate::usecase::error::UsecaseError;

/// Serializes access to the inbox: every mutation holds the write guard for
/// its whole duration, so concurrent writers never interleave. Mutations
/// return the unread count observed under that same guard.
pub struct NotificationsUseCase<N>
where
    N: NotificationRepository,
{
    notification_repository: RwLock<N>,
    preferences: RwLock<NotificationPreferences>,
}

fn record_unread(unread_count: usize) {
    metrics::gauge!("notifications_unread").set(unread_count as f64);
}

impl<N> NotificationsUseCase<N>
where
    N: NotificationRepository,
{
    pub fn new(notification_repository: N) -> Self {
        Self {
            notification_repository: RwLock::new(notification_repository),
            preferences: RwLock::new(NotificationPreferences::default()),
        }
    }

    #[tracing::instrument(skip(self, notification), fields(notification_id = %notification.id, category = %notification.category))]
    pub async fn add_notification(&self, notification: Notification) -> Result<(Notification, usize), UsecaseError> {
        tracing::debug!("adding notification");

        let mut repository = self.notification_repository.write().await;
        if !self.preferences.read().await.allows(notification.category) {
            tracing::info!(notification_id = %notification.id, "notification category disabled, refusing");
            return Err(UsecaseError::Forbidden(format!(
                "Notifications of category {} are disabled",
                notification.category
            )));
        }

        repository.add(notification.clone())?;
        let stored = repository.get(&notification.id)?;
        let unread_count = repository.unread_count();
        record_unread(unread_count);

        tracing::info!(notification_id = %stored.id, unread_count, "notification added");
        Ok((stored, unread_count))
    }

    #[tracing::instrument(skip(self), fields(notification_id = %id))]
    pub async fn mark_as_read(&self, id: &str) -> Result<(bool, usize), UsecaseError> {
        tracing::debug!("marking notification as read");

        let mut repository = self.notification_repository.write().await;
        let changed = repository.mark_read(id)?;
        let unread_count = repository.unread_count();
        record_unread(unread_count);

        tracing::debug!(notification_id = %id, changed, unread_count, "notification marked as read");
        Ok((changed, unread_count))
    }

    #[tracing::instrument(skip(self))]
    pub async fn mark_all_as_read(&self) -> (usize, usize) {
        tracing::debug!("marking all notifications as read");

        let mut repository = self.notification_repository.write().await;
        let updated = repository.mark_all_read();
        let unread_count = repository.unread_count();
        record_unread(unread_count);

        tracing::debug!(updated, "all notifications marked as read");
        (updated, unread_count)
    }

    #[tracing::instrument(skip(self), fields(notification_id = %id))]
    pub async fn remove_notification(&self, id: &str) -> Result<(Notification, usize), UsecaseError> {
        tracing::debug!("removing notification");

        let mut repository = self.notification_repository.write().await;
        let removed = repository.remove(id)?;
        let unread_count = repository.unread_count();
        record_unread(unread_count);

        tracing::info!(notification_id = %id, was_unread = !removed.read, unread_count, "notification removed");
        Ok((removed, unread_count))
    }

    #[tracing::instrument(skip(self), fields(notification_id = %id))]
    pub async fn get_notification(&self, id: &str) -> Result<Notification, UsecaseError> {
        let notification = self.notification_repository.read().await.get(id)?;
        Ok(notification)
    }

    #[tracing::instrument(skip(self))]
    pub async fn count_unread(&self) -> usize {
        let count = self.notification_repository.read().await.unread_count();

        tracing::debug!(count, "unread count retrieved");
        count
    }

    /// Listing and unread count taken under one read guard, so both describe
    /// the same state.
    #[tracing::instrument(skip(self))]
    pub async fn snapshot(
        &self,
        filter: NotificationFilter,
        order: ListOrder,
    ) -> (Vec<Notification>, usize) {
        tracing::debug!("listing notifications");

        let repository = self.notification_repository.read().await;
        let notifications = repository.list(filter, order);
        let unread_count = repository.unread_count();

        tracing::debug!(count = notifications.len(), unread_count, "notifications listed");
        (notifications, unread_count)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_preferences(&self) -> NotificationPreferences {
        *self.preferences.read().await
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_preferences(&self, preferences: NotificationPreferences) -> NotificationPreferences {
        tracing::debug!(?preferences, "saving notification preferences");

        *self.preferences.write().await = preferences;

        tracing::info!("notification preferences saved");
        preferences
    }
}
