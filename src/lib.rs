//! itemshelf - file attachment item service
//!
//! Stores uploaded files on local disk and keeps one SQLite row per item,
//! exposed through a small JSON and multipart HTTP API.

pub mod config;
pub mod db;
pub mod error;
pub mod item;
pub mod logging;
pub mod storage;
pub mod web;

pub use config::Config;
pub use db::Database;
pub use error::{Result, ShelfError};
pub use item::{Item, ItemRepository, ItemService};
pub use storage::BlobStore;
