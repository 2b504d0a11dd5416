pub mod contracts;
pub mod error;
pub mod notifications;
pub mod seed;
