//! Item management module for itemshelf.
//!
//! An item pairs a name and description with one uploaded file:
//! - `ItemRepository` owns the `items` table
//! - `ItemService` keeps the table and the blob store in step

mod repository;
mod service;
mod types;

pub use repository::ItemRepository;
pub use service::{Download, ItemService};
pub use types::{Item, ItemForm, ItemUpdate, NewItem};
