//! Item repository for itemshelf.
//!
//! This module provides CRUD operations for item rows in the database.

use sqlx::QueryBuilder;

use super::types::{Item, ItemUpdate, NewItem};
use crate::db::DbPool;
use crate::{Result, ShelfError};

/// Repository for item CRUD operations.
pub struct ItemRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> ItemRepository<'a> {
    /// Create a new ItemRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Insert a new item.
    ///
    /// Returns the created item with the assigned ID.
    pub async fn create(&self, item: &NewItem) -> Result<Item> {
        let result = sqlx::query(
            "INSERT INTO items (name, description, filepath, original_name)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&item.name)
        .bind(&item.description)
        .bind(&item.filepath)
        .bind(&item.original_name)
        .execute(self.pool)
        .await
        .map_err(|e| ShelfError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| ShelfError::NotFound("item".to_string()))
    }

    /// Get an item by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            "SELECT id, name, description, filepath, original_name FROM items WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| ShelfError::Database(e.to_string()))?;

        Ok(item)
    }

    /// List all items in storage order.
    pub async fn list(&self) -> Result<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            "SELECT id, name, description, filepath, original_name FROM items ORDER BY id",
        )
        .fetch_all(self.pool)
        .await
        .map_err(|e| ShelfError::Database(e.to_string()))?;

        Ok(items)
    }

    /// Update an item.
    ///
    /// Only fields that are set in the update will be modified.
    /// Returns the updated item, or None if not found.
    pub async fn update(&self, id: i64, update: &ItemUpdate) -> Result<Option<Item>> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE items SET ");
        let mut separated = query.separated(", ");

        if let Some(ref name) = update.name {
            separated.push("name = ");
            separated.push_bind_unseparated(name);
        }

        if let Some(ref description) = update.description {
            separated.push("description = ");
            separated.push_bind_unseparated(description);
        }

        if let Some(ref filepath) = update.filepath {
            separated.push("filepath = ");
            separated.push_bind_unseparated(filepath);
        }

        if let Some(ref original_name) = update.original_name {
            separated.push("original_name = ");
            separated.push_bind_unseparated(original_name);
        }

        query.push(" WHERE id = ");
        query.push_bind(id);

        let result = query
            .build()
            .execute(self.pool)
            .await
            .map_err(|e| ShelfError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete an item by ID.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| ShelfError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    /// Count all items.
    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM items")
            .fetch_one(self.pool)
            .await
            .map_err(|e| ShelfError::Database(e.to_string()))?;

        Ok(count.0)
    }
}
