//! Item types for itemshelf.

use crate::storage::StoredBlob;

/// An item record: user metadata paired with one stored blob.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Item {
    /// Unique item ID.
    pub id: i64,
    /// Display name.
    pub name: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Generated blob name, relative to the blob store root.
    pub filepath: Option<String>,
    /// Filename the client uploaded, used for downloads.
    pub original_name: Option<String>,
}

/// Data for creating a new item row.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: Option<String>,
    pub description: Option<String>,
    pub filepath: String,
    pub original_name: String,
}

impl NewItem {
    /// Create a new NewItem referencing a stored blob.
    pub fn new(filepath: impl Into<String>, original_name: impl Into<String>) -> Self {
        Self {
            name: None,
            description: None,
            filepath: filepath.into(),
            original_name: original_name.into(),
        }
    }

    /// Set the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Builder for updating an item.
///
/// `None` leaves the stored column untouched; `Some` overwrites it, an empty
/// string included.
#[derive(Debug, Clone, Default)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub filepath: Option<String>,
    pub original_name: Option<String>,
}

impl ItemUpdate {
    /// Create an empty ItemUpdate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Point the item at a different blob.
    pub fn file(mut self, filepath: impl Into<String>, original_name: impl Into<String>) -> Self {
        self.filepath = Some(filepath.into());
        self.original_name = Some(original_name.into());
        self
    }

    /// Check if the update touches no column.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.filepath.is_none()
            && self.original_name.is_none()
    }
}

/// Decoded write request: text fields plus a blob already written to the store.
#[derive(Debug, Clone, Default)]
pub struct ItemForm {
    /// `name` field, if the client sent one.
    pub name: Option<String>,
    /// `description` field, if the client sent one.
    pub description: Option<String>,
    /// Uploaded file, if the client sent one.
    pub file: Option<StoredBlob>,
}

impl ItemForm {
    /// Turn the text fields and optional blob into a column update.
    pub fn to_update(&self) -> ItemUpdate {
        let mut update = ItemUpdate {
            name: self.name.clone(),
            description: self.description.clone(),
            ..Default::default()
        };
        if let Some(ref blob) = self.file {
            update = update.file(&blob.stored_name, &blob.original_name);
        }
        update
    }
}
