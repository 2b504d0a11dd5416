use crate::{
    domain::filter::{ListOrder, NotificationFilter},
    domain::notification::Notification,
    repository::errors::RepositoryError,
};

#[cfg_attr(test, mockall::automock)]
pub trait NotificationRepository: Send + Sync {
    fn add(&mut self, notification: Notification) -> Result<(), RepositoryError>;
    fn mark_read(&mut self, id: &str) -> Result<bool, RepositoryError>;
    fn mark_all_read(&mut self) -> usize;
    fn remove(&mut self, id: &str) -> Result<Notification, RepositoryError>;
    fn get(&self, id: &str) -> Result<Notification, RepositoryError>;
    fn unread_count(&self) -> usize;
    fn list(&self, filter: NotificationFilter, order: ListOrder) -> Vec<Notification>;
}
