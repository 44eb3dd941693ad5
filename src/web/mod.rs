//! Web API module for itemshelf.
//!
//! Serves the item CRUD endpoints, file downloads, and the uploads
//! directory as static content.

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod router;
pub mod server;
pub mod upload;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::{create_app, create_router};
pub use server::WebServer;
