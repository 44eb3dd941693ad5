//! Response DTOs for Web API.

use serde::Serialize;
use utoipa::ToSchema;

use crate::item::Item;

/// Item as returned by the list and create endpoints.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    /// Item ID.
    pub id: i64,
    /// Display name.
    pub name: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Generated blob name.
    pub filepath: Option<String>,
    /// Filename the client uploaded.
    pub original_name: Option<String>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            filepath: item.filepath,
            original_name: item.original_name,
        }
    }
}

/// Body of a successful update.
#[derive(Debug, Serialize, ToSchema)]
pub struct ItemUpdateResponse {
    /// Item ID.
    pub id: i64,
    /// Stored name after the update.
    pub name: Option<String>,
    /// Stored description after the update.
    pub description: Option<String>,
}

impl From<Item> for ItemUpdateResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
        }
    }
}

/// Plain confirmation message.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_item() -> Item {
        Item {
            id: 7,
            name: Some("A".to_string()),
            description: None,
            filepath: Some("1-abcd1234-a.txt".to_string()),
            original_name: Some("a.txt".to_string()),
        }
    }

    #[test]
    fn test_item_response_keys() {
        let value = serde_json::to_value(ItemResponse::from(sample_item())).unwrap();

        assert_eq!(
            value,
            json!({
                "id": 7,
                "name": "A",
                "description": null,
                "filepath": "1-abcd1234-a.txt",
                "originalName": "a.txt"
            })
        );
    }

    #[test]
    fn test_update_response_keys() {
        let value = serde_json::to_value(ItemUpdateResponse::from(sample_item())).unwrap();
        assert_eq!(value, json!({"id": 7, "name": "A", "description": null}));
    }

    #[test]
    fn test_message_response() {
        let value = serde_json::to_value(MessageResponse::new("Item deleted")).unwrap();
        assert_eq!(value, json!({"message": "Item deleted"}));
    }
}
