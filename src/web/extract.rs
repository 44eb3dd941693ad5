//! Request extractors whose rejections use the API error body.

use axum::{
    async_trait,
    extract::{
        multipart::MultipartRejection,
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts, Multipart, Path, Request,
    },
    http::{header, request::Parts, StatusCode},
    Json,
};

use crate::web::dto::ItemFieldsRequest;
use crate::web::error::{ApiError, ErrorCode};

/// Item ID taken from the `:id` path segment.
pub struct ItemId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for ItemId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|e: PathRejection| {
                tracing::debug!("Rejected item id: {}", e.body_text());
                ApiError::bad_request("Invalid item id")
            })?;
        Ok(ItemId(id))
    }
}

/// Body of an item write: multipart with an optional file, or JSON text fields.
pub enum ItemBody {
    /// `multipart/form-data` body.
    Multipart(Multipart),
    /// `application/json` body carrying only `name` and `description`.
    Json(ItemFieldsRequest),
}

fn is_json(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|mime| {
            let mime = mime.trim();
            mime.eq_ignore_ascii_case("application/json")
                || (mime.starts_with("application/") && mime.ends_with("+json"))
        })
        .unwrap_or(false)
}

#[async_trait]
impl<S> FromRequest<S> for ItemBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(&req) {
            let Json(fields) = Json::<ItemFieldsRequest>::from_request(req, state)
                .await
                .map_err(|e: JsonRejection| {
                    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                        return ApiError::new(ErrorCode::PayloadTooLarge, "Request body too large");
                    }
                    ApiError::bad_request(format!("Invalid JSON: {}", e.body_text()))
                })?;
            return Ok(ItemBody::Json(fields));
        }

        let multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e: MultipartRejection| {
                tracing::debug!("Rejected multipart body: {}", e.body_text());
                ApiError::bad_request("Expected a multipart/form-data or JSON body")
            })?;
        Ok(ItemBody::Multipart(multipart))
    }
}
