//! Blob storage for itemshelf.
//!
//! Uploaded files live flat under a single root directory:
//! ```text
//! {root}/
//! ├── 1718000000000-3f9a1c2e-report.pdf
//! └── 1718000000123-b07d44aa-photo.png
//! ```
//! A stored name is `{unix millis}-{8 hex chars}-{original filename}`, so the
//! files stay human-browsable while two uploads of the same name in the same
//! millisecond still land on different paths.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use uuid::Uuid;

use crate::{Result, ShelfError};

/// Fallback used when a client-supplied filename has no usable final component.
const FALLBACK_NAME: &str = "upload.bin";

/// A blob written to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    /// Generated name, relative to the store root.
    pub stored_name: String,
    /// Filename as supplied by the client.
    pub original_name: String,
    /// Size in bytes.
    pub size: u64,
}

/// Local filesystem blob store rooted at one directory.
#[derive(Debug, Clone)]
pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    /// Create a store rooted at `root`, creating the directory if it doesn't exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;

        Ok(Self { root })
    }

    /// Root directory of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Save `content` under a freshly generated name derived from `original_name`.
    pub async fn save(&self, content: &[u8], original_name: &str) -> Result<StoredBlob> {
        let stored_name = Self::generate_stored_name(original_name);
        let path = self.resolve(&stored_name)?;

        fs::write(&path, content).await?;
        tracing::debug!("Stored blob {:?} ({} bytes)", path, content.len());

        Ok(StoredBlob {
            stored_name,
            original_name: original_name.to_string(),
            size: content.len() as u64,
        })
    }

    /// Load the bytes of a stored blob.
    pub async fn load(&self, stored_name: &str) -> Result<Vec<u8>> {
        let path = self.resolve(stored_name)?;

        match fs::read(&path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(ShelfError::NotFound(format!("blob {stored_name}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Check whether a stored blob is present on disk.
    pub async fn exists(&self, stored_name: &str) -> bool {
        match self.resolve(stored_name) {
            Ok(path) => fs::try_exists(&path).await.unwrap_or(false),
            Err(_) => false,
        }
    }

    /// Delete a stored blob.
    ///
    /// Returns `true` if the file was removed and `false` if it was already
    /// gone. Callers treat this as best-effort cleanup: log the error, never
    /// fail the request on it.
    pub async fn delete(&self, stored_name: &str) -> Result<bool> {
        let path = self.resolve(stored_name)?;

        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Full path of a stored name inside the root.
    ///
    /// Names that are not a single plain path component are rejected.
    pub fn resolve(&self, stored_name: &str) -> Result<PathBuf> {
        if !is_plain_file_name(stored_name) {
            return Err(ShelfError::Validation(format!(
                "invalid stored name: {stored_name:?}"
            )));
        }
        Ok(self.root.join(stored_name))
    }

    /// Generate a stored name for an uploaded file.
    pub fn generate_stored_name(original_name: &str) -> String {
        let millis = chrono::Utc::now().timestamp_millis();
        let suffix = Uuid::new_v4().simple().to_string();
        format!(
            "{millis}-{}-{}",
            &suffix[..8],
            Self::sanitize_original_name(original_name)
        )
    }

    /// Reduce a client-supplied filename to a safe final path component.
    fn sanitize_original_name(original_name: &str) -> String {
        let last = original_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default();
        let cleaned: String = last.chars().filter(|c| !c.is_control()).collect();
        let cleaned = cleaned.trim();

        if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
            FALLBACK_NAME.to_string()
        } else {
            cleaned.to_string()
        }
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.chars().any(|c| c.is_control())
}
