use crate::{
    domain::filter::{ListOrder, NotificationFilter},
    domain::notification::Notification,
    repository::errors::RepositoryError,
    usecase::contracts::NotificationRepository,
};

/// In-memory inbox. Items are kept in insertion order; ids are unique.
#[derive(Debug, Default)]
pub struct NotificationStore {
    notifications: Vec<Notification>,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from an existing list, keeping each item's read flag.
    pub fn seeded<I>(items: I) -> Result<Self, RepositoryError>
    where
        I: IntoIterator<Item = Notification>,
    {
        let mut store = Self::new();
        for notification in items {
            if store.position(&notification.id).is_some() {
                return Err(RepositoryError::DuplicateId(notification.id));
            }
            store.notifications.push(notification);
        }

        tracing::debug!(count = store.notifications.len(), "notification store seeded");
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.notifications.iter().position(|n| n.id == id)
    }

    fn find_index(&self, id: &str) -> Result<usize, RepositoryError> {
        self.position(id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }
}

impl NotificationRepository for NotificationStore {
    fn add(&mut self, mut notification: Notification) -> Result<(), RepositoryError> {
        if self.position(&notification.id).is_some() {
            return Err(RepositoryError::DuplicateId(notification.id));
        }

        notification.read = false;
        self.notifications.push(notification);
        Ok(())
    }

    fn mark_read(&mut self, id: &str) -> Result<bool, RepositoryError> {
        let index = self.find_index(id)?;
        let notification = &mut self.notifications[index];
        let changed = !notification.read;
        notification.read = true;
        Ok(changed)
    }

    fn mark_all_read(&mut self) -> usize {
        let mut changed = 0;
        for notification in self.notifications.iter_mut().filter(|n| !n.read) {
            notification.read = true;
            changed += 1;
        }
        changed
    }

    fn remove(&mut self, id: &str) -> Result<Notification, RepositoryError> {
        let index = self.find_index(id)?;
        Ok(self.notifications.remove(index))
    }

    fn get(&self, id: &str) -> Result<Notification, RepositoryError> {
        let index = self.find_index(id)?;
        Ok(self.notifications[index].clone())
    }

    fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| n.is_unread()).count()
    }

    fn list(&self, filter: NotificationFilter, order: ListOrder) -> Vec<Notification> {
        let mut notifications: Vec<Notification> = self
            .notifications
            .iter()
            .filter(|n| filter.matches(n))
            .cloned()
            .collect();

        if order == ListOrder::NewestFirst {
            // stable: equal timestamps keep insertion order
            notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        }

        notifications
    }
}
