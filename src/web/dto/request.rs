//! Request DTOs for Web API.
//!
//! Write endpoints take multipart bodies that are decoded by
//! [`crate::web::upload::UploadForm`]; `ItemUploadForm` only describes that
//! body in the OpenAPI document. Text-only writes may send JSON instead.

use serde::Deserialize;
use utoipa::ToSchema;

use crate::item::ItemForm;

/// Multipart body for creating or updating an item.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct ItemUploadForm {
    /// File to store. Required on create, optional on update.
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    /// Display name.
    pub name: Option<String>,
    /// Description.
    pub description: Option<String>,
}

/// JSON body for a text-only item write.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ItemFieldsRequest {
    /// New display name. Omitted or `null` keeps the stored value.
    #[serde(default)]
    pub name: Option<String>,
    /// New description. Omitted or `null` keeps the stored value.
    #[serde(default)]
    pub description: Option<String>,
}

impl From<ItemFieldsRequest> for ItemForm {
    fn from(req: ItemFieldsRequest) -> Self {
        ItemForm {
            name: req.name,
            description: req.description,
            file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_request_to_form() {
        let req: ItemFieldsRequest = serde_json::from_str(r#"{"name": "Z"}"#).unwrap();
        let form = ItemForm::from(req);

        assert_eq!(form.name.as_deref(), Some("Z"));
        assert!(form.description.is_none());
        assert!(form.file.is_none());
    }

    #[test]
    fn test_fields_request_empty_string_is_kept() {
        let req: ItemFieldsRequest =
            serde_json::from_str(r#"{"name": "", "description": null}"#).unwrap();
        let form = ItemForm::from(req);

        assert_eq!(form.name.as_deref(), Some(""));
        assert!(form.description.is_none());
    }
}
