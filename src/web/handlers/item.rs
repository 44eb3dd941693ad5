//! Item handlers for Web API.

use axum::{
    body::Body,
    extract::State,
    http::header,
    response::Response,
    Json,
};
use std::sync::Arc;

use crate::web::dto::{ItemResponse, ItemUpdateResponse, ItemUploadForm, MessageResponse};
use crate::web::error::{ApiError, ErrorBody};
use crate::web::extract::{ItemBody, ItemId};
use crate::web::handlers::AppState;
use crate::web::upload::UploadForm;

/// Generate a safe Content-Disposition header value for file downloads.
///
/// Plain ASCII names are sent as `attachment; filename="<name>"`. Anything
/// else gets a sanitized fallback plus an RFC 5987 `filename*` parameter.
fn content_disposition_header(filename: &str) -> String {
    if filename.is_ascii() && !filename.chars().any(|c| c.is_control() || c == '"' || c == '\\') {
        return format!("attachment; filename=\"{}\"", filename);
    }

    let sanitized: String = filename
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '"' | '\\' => '_',
            c if !c.is_ascii() => '_',
            _ => c,
        })
        .collect();
    let encoded = urlencoding::encode(filename);

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        sanitized, encoded
    )
}

/// GET /items - List all items.
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    responses(
        (status = 200, description = "All items", body = Vec<ItemResponse>),
        (status = 500, description = "Storage error", body = ErrorBody)
    )
)]
pub async fn list_items(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ItemResponse>>, ApiError> {
    let items = state.items().list().await?;
    Ok(Json(items.into_iter().map(ItemResponse::from).collect()))
}

/// GET /files/:id - Download an item's file under its original name.
#[utoipa::path(
    get,
    path = "/files/{id}",
    tag = "items",
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "File content as application/octet-stream"),
        (status = 404, description = "No such item, or its file is gone", body = ErrorBody),
        (status = 500, description = "Storage error", body = ErrorBody)
    )
)]
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    ItemId(item_id): ItemId,
) -> Result<Response<Body>, ApiError> {
    let download = state.items().download(item_id).await?;

    let response = Response::builder()
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_header(&download.filename),
        )
        .header(header::CONTENT_LENGTH, download.content.len())
        .body(Body::from(download.content))
        .map_err(|e| {
            tracing::error!("Failed to build response: {}", e);
            ApiError::internal("Failed to build response")
        })?;

    Ok(response)
}

/// POST /items - Create an item from a multipart upload.
///
/// Request body: multipart/form-data with a required "file" part and
/// optional "name" and "description" fields. A JSON body has no file and
/// is rejected as such.
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    request_body(content = ItemUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Item created", body = ItemResponse),
        (status = 400, description = "No file uploaded or malformed body", body = ErrorBody),
        (status = 500, description = "Storage error", body = ErrorBody)
    )
)]
pub async fn create_item(
    State(state): State<Arc<AppState>>,
    body: ItemBody,
) -> Result<Json<ItemResponse>, ApiError> {
    let form = UploadForm::from_body(body, &state.storage).await?;
    let item = state.items().create(form).await?;
    Ok(Json(ItemResponse::from(item)))
}

/// PUT /items/:id - Update an item.
///
/// Accepts multipart/form-data or a JSON `{name, description}` body.
/// Fields missing from the body keep their stored values; a "file" part
/// replaces the stored file.
#[utoipa::path(
    put,
    path = "/items/{id}",
    tag = "items",
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    request_body(
        content = ItemUploadForm,
        content_type = "multipart/form-data",
        description = "Multipart form, or a JSON ItemFieldsRequest for a text-only update"
    ),
    responses(
        (status = 200, description = "Item updated", body = ItemUpdateResponse),
        (status = 400, description = "Malformed body or item id", body = ErrorBody),
        (status = 404, description = "Item not found", body = ErrorBody),
        (status = 500, description = "Storage error", body = ErrorBody)
    )
)]
pub async fn update_item(
    State(state): State<Arc<AppState>>,
    ItemId(item_id): ItemId,
    body: ItemBody,
) -> Result<Json<ItemUpdateResponse>, ApiError> {
    let form = UploadForm::from_body(body, &state.storage).await?;
    let item = state.items().update(item_id, form).await?;
    Ok(Json(ItemUpdateResponse::from(item)))
}

/// DELETE /items/:id - Delete an item and its file.
#[utoipa::path(
    delete,
    path = "/items/{id}",
    tag = "items",
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item deleted", body = MessageResponse),
        (status = 500, description = "Storage error", body = ErrorBody)
    )
)]
pub async fn delete_item(
    State(state): State<Arc<AppState>>,
    ItemId(item_id): ItemId,
) -> Result<Json<MessageResponse>, ApiError> {
    state.items().delete(item_id).await?;
    Ok(Json(MessageResponse::new("Item deleted")))
}
