use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Notification {0} already exists")]
    DuplicateId(String),
    #[error("Notification {0} not found")]
    NotFound(String),
}
