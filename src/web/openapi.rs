//! OpenAPI document for the item API.

use utoipa::OpenApi;

use super::dto::{
    ItemFieldsRequest, ItemResponse, ItemUpdateResponse, ItemUploadForm, MessageResponse,
};
use super::error::{ErrorBody, ErrorCode, ErrorDetail};
use super::handlers::item;

#[derive(OpenApi)]
#[openapi(
    info(title = "itemshelf", description = "File attachment item API"),
    paths(
        item::list_items,
        item::download_file,
        item::create_item,
        item::update_item,
        item::delete_item,
    ),
    components(schemas(
        ItemResponse,
        ItemUpdateResponse,
        ItemUploadForm,
        ItemFieldsRequest,
        MessageResponse,
        ErrorBody,
        ErrorDetail,
        ErrorCode,
    )),
    tags(
        (name = "items", description = "Items and their attached files")
    )
)]
pub struct ApiDoc;
