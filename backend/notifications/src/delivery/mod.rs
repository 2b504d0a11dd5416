pub mod http;
pub mod presenter;
