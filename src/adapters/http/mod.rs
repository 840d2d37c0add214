//! HTTP adapter: the validation endpoint, its DTOs and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::ValidationHandlers;
pub use routes::api_router;
