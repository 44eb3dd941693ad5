//! API handlers for the Web API.

pub mod item;

pub use item::*;

use std::sync::Arc;

use crate::item::ItemService;
use crate::storage::BlobStore;
use crate::Database;

/// Shared database handle.
pub type SharedDatabase = Arc<Database>;

/// Application state shared by all handlers.
pub struct AppState {
    /// Database connection pool.
    pub db: SharedDatabase,
    /// Blob store for uploaded files.
    pub storage: BlobStore,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: SharedDatabase, storage: BlobStore) -> Self {
        Self { db, storage }
    }

    /// Item service bound to this state.
    pub fn items(&self) -> ItemService<'_> {
        ItemService::new(self.db.pool(), &self.storage)
    }
}
