//! Item service for itemshelf.
//!
//! Coordinates the blob store and the item table for:
//! - listing items
//! - downloading an item's blob
//! - create, update and delete with blob bookkeeping

use crate::db::DbPool;
use crate::storage::BlobStore;
use crate::{Result, ShelfError};

use super::repository::ItemRepository;
use super::types::{Item, ItemForm, NewItem};

/// Result of a download.
#[derive(Debug)]
pub struct Download {
    /// Item the blob belongs to.
    pub item: Item,
    /// Name to offer the client.
    pub filename: String,
    /// Blob content.
    pub content: Vec<u8>,
}

/// Item service combining the item table and the blob store.
pub struct ItemService<'a> {
    pool: &'a DbPool,
    storage: &'a BlobStore,
}

impl<'a> ItemService<'a> {
    /// Create a new ItemService.
    pub fn new(pool: &'a DbPool, storage: &'a BlobStore) -> Self {
        Self { pool, storage }
    }

    fn repo(&self) -> ItemRepository<'a> {
        ItemRepository::new(self.pool)
    }

    /// List all items.
    pub async fn list(&self) -> Result<Vec<Item>> {
        self.repo().list().await
    }

    /// Load an item's blob for download.
    ///
    /// A missing row is `NotFound`; a row whose blob is gone from disk is
    /// `BlobMissing`.
    pub async fn download(&self, id: i64) -> Result<Download> {
        let item = self
            .repo()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ShelfError::NotFound("File".to_string()))?;

        let on_disk = match item.filepath.as_deref() {
            Some(name) => self.storage.exists(name).await,
            None => false,
        };
        let stored_name = match item.filepath.clone() {
            Some(name) if on_disk => name,
            other => {
                tracing::warn!(item_id = id, filepath = ?other, "Blob missing from storage");
                return Err(ShelfError::BlobMissing("File".to_string()));
            }
        };

        let content = match self.storage.load(&stored_name).await {
            Ok(content) => content,
            Err(ShelfError::NotFound(_)) => {
                return Err(ShelfError::BlobMissing("File".to_string()));
            }
            Err(e) => return Err(e),
        };

        let filename = item
            .original_name
            .clone()
            .unwrap_or_else(|| stored_name.clone());

        Ok(Download {
            item,
            filename,
            content,
        })
    }

    /// Create an item from a decoded form.
    ///
    /// The form must carry a file. If the insert fails, the blob that was
    /// already stored for this request is discarded.
    pub async fn create(&self, form: ItemForm) -> Result<Item> {
        let blob = form
            .file
            .ok_or_else(|| ShelfError::Validation("No file uploaded".to_string()))?;

        let mut new_item = NewItem::new(&blob.stored_name, &blob.original_name);
        new_item.name = form.name;
        new_item.description = form.description;

        match self.repo().create(&new_item).await {
            Ok(item) => {
                tracing::info!(
                    item_id = item.id,
                    filepath = %blob.stored_name,
                    size = blob.size,
                    "Created item"
                );
                Ok(item)
            }
            Err(e) => {
                self.discard_blob(&blob.stored_name).await;
                Err(e)
            }
        }
    }

    /// Update an item from a decoded form.
    ///
    /// Absent text fields keep their stored values. A new file replaces the
    /// old blob, which is removed before the row is repointed.
    pub async fn update(&self, id: i64, form: ItemForm) -> Result<Item> {
        let repo = self.repo();

        let existing = match repo.get_by_id(id).await? {
            Some(item) => item,
            None => {
                if let Some(ref blob) = form.file {
                    self.discard_blob(&blob.stored_name).await;
                }
                return Err(ShelfError::NotFound("Item".to_string()));
            }
        };

        if form.file.is_some() {
            if let Some(ref old) = existing.filepath {
                self.discard_blob(old).await;
            }
        }

        let updated = repo
            .update(id, &form.to_update())
            .await?
            .ok_or_else(|| ShelfError::NotFound("Item".to_string()))?;

        tracing::info!(item_id = id, replaced_file = form.file.is_some(), "Updated item");
        Ok(updated)
    }

    /// Delete an item and, best-effort, its blob.
    ///
    /// Returns whether a row was removed.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let repo = self.repo();

        if let Some(item) = repo.get_by_id(id).await? {
            if let Some(ref filepath) = item.filepath {
                self.discard_blob(filepath).await;
            }
        }

        let deleted = repo.delete(id).await?;
        tracing::info!(item_id = id, deleted, "Deleted item");
        Ok(deleted)
    }

    /// Remove a blob without failing the caller.
    async fn discard_blob(&self, stored_name: &str) {
        match self.storage.delete(stored_name).await {
            Ok(true) => tracing::debug!("Removed blob {}", stored_name),
            Ok(false) => tracing::warn!("Blob {} was already missing", stored_name),
            Err(e) => tracing::error!("Error deleting blob {}: {}", stored_name, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemRepository;
    use crate::Database;
    use tempfile::TempDir;

    struct Fixture {
        _temp_dir: TempDir,
        db: Database,
        storage: BlobStore,
    }

    async fn setup() -> Fixture {
        let temp_dir = TempDir::new().unwrap();
        let storage = BlobStore::new(temp_dir.path().join("uploads")).unwrap();
        let db = Database::open_in_memory().await.unwrap();
        Fixture {
            _temp_dir: temp_dir,
            db,
            storage,
        }
    }

    async fn form_with_file(
        storage: &BlobStore,
        name: Option<&str>,
        description: Option<&str>,
        content: &[u8],
        filename: &str,
    ) -> ItemForm {
        ItemForm {
            name: name.map(str::to_string),
            description: description.map(str::to_string),
            file: Some(storage.save(content, filename).await.unwrap()),
        }
    }

    #[tokio::test]
    async fn test_create_requires_file() {
        let fx = setup().await;
        let service = ItemService::new(fx.db.pool(), &fx.storage);

        let form = ItemForm {
            name: Some("A".to_string()),
            ..Default::default()
        };
        let result = service.create(form).await;

        assert!(matches!(result, Err(ShelfError::Validation(_))));
        assert_eq!(ItemRepository::new(fx.db.pool()).count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let fx = setup().await;
        let service = ItemService::new(fx.db.pool(), &fx.storage);

        let form = form_with_file(&fx.storage, Some("A"), Some("B"), b"data", "a.txt").await;
        let item = service.create(form).await.unwrap();

        assert_eq!(item.name.as_deref(), Some("A"));
        assert_eq!(item.description.as_deref(), Some("B"));
        assert_eq!(item.original_name.as_deref(), Some("a.txt"));
        assert!(fx.storage.exists(item.filepath.as_deref().unwrap()).await);

        let items = service.list().await.unwrap();
        assert_eq!(items, vec![item]);
    }

    #[tokio::test]
    async fn test_create_discards_blob_when_insert_fails() {
        let fx = setup().await;
        let service = ItemService::new(fx.db.pool(), &fx.storage);

        sqlx::query("DROP TABLE items")
            .execute(fx.db.pool())
            .await
            .unwrap();

        let form = form_with_file(&fx.storage, Some("A"), None, b"data", "a.txt").await;
        let stored_name = form.file.as_ref().unwrap().stored_name.clone();
        assert!(fx.storage.exists(&stored_name).await);

        let result = service.create(form).await;

        assert!(matches!(result, Err(ShelfError::Database(_))));
        assert!(!fx.storage.exists(&stored_name).await);
    }

    #[tokio::test]
    async fn test_download() {
        let fx = setup().await;
        let service = ItemService::new(fx.db.pool(), &fx.storage);

        let form = form_with_file(&fx.storage, None, None, b"payload", "report.pdf").await;
        let item = service.create(form).await.unwrap();

        let download = service.download(item.id).await.unwrap();
        assert_eq!(download.content, b"payload");
        assert_eq!(download.filename, "report.pdf");
        assert_eq!(download.item.id, item.id);
    }

    #[tokio::test]
    async fn test_download_missing_row() {
        let fx = setup().await;
        let service = ItemService::new(fx.db.pool(), &fx.storage);

        let result = service.download(404).await;
        assert!(matches!(result, Err(ShelfError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_download_missing_blob() {
        let fx = setup().await;
        let service = ItemService::new(fx.db.pool(), &fx.storage);

        let form = form_with_file(&fx.storage, None, None, b"x", "gone.txt").await;
        let item = service.create(form).await.unwrap();
        std::fs::remove_file(fx.storage.root().join(item.filepath.unwrap())).unwrap();

        let result = service.download(item.id).await;
        assert!(matches!(result, Err(ShelfError::BlobMissing(_))));
    }

    #[tokio::test]
    async fn test_update_text_only_keeps_absent_fields() {
        let fx = setup().await;
        let service = ItemService::new(fx.db.pool(), &fx.storage);

        let form = form_with_file(&fx.storage, Some("A"), Some("B"), b"x", "a.txt").await;
        let item = service.create(form).await.unwrap();

        let updated = service
            .update(
                item.id,
                ItemForm {
                    description: Some("C".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name.as_deref(), Some("A"));
        assert_eq!(updated.description.as_deref(), Some("C"));
        assert_eq!(updated.filepath, item.filepath);
    }

    #[tokio::test]
    async fn test_update_with_file_replaces_blob() {
        let fx = setup().await;
        let service = ItemService::new(fx.db.pool(), &fx.storage);

        let form = form_with_file(&fx.storage, Some("A"), None, b"old", "old.txt").await;
        let item = service.create(form).await.unwrap();
        let old_name = item.filepath.clone().unwrap();

        let form = form_with_file(&fx.storage, None, None, b"new", "new.txt").await;
        let updated = service.update(item.id, form).await.unwrap();

        let new_name = updated.filepath.clone().unwrap();
        assert_ne!(new_name, old_name);
        assert_eq!(updated.original_name.as_deref(), Some("new.txt"));
        assert_eq!(updated.name.as_deref(), Some("A"));
        assert!(!fx.storage.exists(&old_name).await);
        assert_eq!(fx.storage.load(&new_name).await.unwrap(), b"new");
    }

    #[tokio::test]
    async fn test_update_not_found_discards_upload() {
        let fx = setup().await;
        let service = ItemService::new(fx.db.pool(), &fx.storage);

        let form = form_with_file(&fx.storage, None, None, b"orphan", "o.txt").await;
        let stored = form.file.clone().unwrap().stored_name;

        let result = service.update(77, form).await;

        assert!(matches!(result, Err(ShelfError::NotFound(_))));
        assert!(!fx.storage.exists(&stored).await);
    }

    #[tokio::test]
    async fn test_update_tolerates_missing_old_blob() {
        let fx = setup().await;
        let service = ItemService::new(fx.db.pool(), &fx.storage);

        let form = form_with_file(&fx.storage, None, None, b"old", "old.txt").await;
        let item = service.create(form).await.unwrap();
        fx.storage.delete(item.filepath.as_deref().unwrap()).await.unwrap();

        let form = form_with_file(&fx.storage, None, None, b"new", "new.txt").await;
        assert!(service.update(item.id, form).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_removes_row_and_blob() {
        let fx = setup().await;
        let service = ItemService::new(fx.db.pool(), &fx.storage);

        let form = form_with_file(&fx.storage, None, None, b"x", "x.txt").await;
        let item = service.create(form).await.unwrap();
        let stored = item.filepath.clone().unwrap();

        assert!(service.delete(item.id).await.unwrap());
        assert!(service.list().await.unwrap().is_empty());
        assert!(!fx.storage.exists(&stored).await);
    }

    #[tokio::test]
    async fn test_delete_missing_item() {
        let fx = setup().await;
        let service = ItemService::new(fx.db.pool(), &fx.storage);

        assert!(!service.delete(9).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_row_with_invalid_filepath() {
        let fx = setup().await;
        let service = ItemService::new(fx.db.pool(), &fx.storage);

        // A row pointing outside the store is still deleted
        let item = ItemRepository::new(fx.db.pool())
            .create(&NewItem::new("../escape.txt", "escape.txt"))
            .await
            .unwrap();

        assert!(service.delete(item.id).await.unwrap());
    }
}
