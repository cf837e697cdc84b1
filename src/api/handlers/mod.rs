//! HTTP request handlers.

pub mod auth_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use user_handler::manager_routes;
