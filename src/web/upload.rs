//! Multipart upload decoding.
//!
//! The `file` part is written to the blob store while the body is read, so
//! the item service only ever sees a stored blob and the text fields.

use axum::extract::Multipart;

use crate::item::ItemForm;
use crate::storage::BlobStore;
use crate::web::error::ApiError;
use crate::web::extract::ItemBody;

/// Name of the multipart part carrying the upload.
pub const FILE_FIELD: &str = "file";

/// Decoder for item write requests.
pub struct UploadForm;

impl UploadForm {
    /// Decode an item write body of either encoding.
    ///
    /// A JSON body never carries a file.
    pub async fn from_body(body: ItemBody, storage: &BlobStore) -> Result<ItemForm, ApiError> {
        match body {
            ItemBody::Multipart(multipart) => Self::read(multipart, storage).await,
            ItemBody::Json(fields) => Ok(ItemForm::from(fields)),
        }
    }

    /// Read every part of `multipart`, storing the file part in `storage`.
    ///
    /// On a decoding error the blob already stored for this request is
    /// removed again.
    pub async fn read(mut multipart: Multipart, storage: &BlobStore) -> Result<ItemForm, ApiError> {
        let mut form = ItemForm::default();

        if let Err(e) = Self::read_parts(&mut multipart, storage, &mut form).await {
            if let Some(ref blob) = form.file {
                if let Err(del) = storage.delete(&blob.stored_name).await {
                    tracing::error!("Error deleting blob {}: {}", blob.stored_name, del);
                }
            }
            return Err(e);
        }

        Ok(form)
    }

    async fn read_parts(
        multipart: &mut Multipart,
        storage: &BlobStore,
        form: &mut ItemForm,
    ) -> Result<(), ApiError> {
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(ApiError::from_multipart)?
        {
            let field_name = field.name().unwrap_or("").to_string();

            match field_name.as_str() {
                FILE_FIELD => {
                    // A `file` part without a filename is a plain value, not an upload
                    let Some(original_name) = field.file_name().map(str::to_string) else {
                        tracing::debug!("Ignoring file field without filename");
                        continue;
                    };

                    if form.file.is_some() {
                        return Err(ApiError::bad_request("Only one file may be uploaded"));
                    }

                    let content = field.bytes().await.map_err(ApiError::from_multipart)?;
                    let blob = storage.save(&content, &original_name).await?;
                    tracing::debug!(
                        "Received file {:?} stored as {}",
                        original_name,
                        blob.stored_name
                    );
                    form.file = Some(blob);
                }
                "name" => {
                    form.name = Some(field.text().await.map_err(ApiError::from_multipart)?);
                }
                "description" => {
                    form.description = Some(field.text().await.map_err(ApiError::from_multipart)?);
                }
                _ => {
                    tracing::debug!("Ignoring multipart field {:?}", field_name);
                }
            }
        }

        Ok(())
    }
}
