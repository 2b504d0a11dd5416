pub mod filter;
pub mod notification;
pub mod preferences;
