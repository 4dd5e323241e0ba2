use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::ItemError;

/// An item as it is persisted in the store
///
/// `id` is `None` only before insertion; the store assigns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub category_name: String,
    pub name: String,
    pub img_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request body for creating an item
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItem {
    #[validate(length(min = 1, message = "categoryName must not be empty"))]
    pub category_name: String,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "imgUrl must not be empty"))]
    pub img_url: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<CreateItem> for ItemDocument {
    fn from(input: CreateItem) -> Self {
        Self {
            id: None,
            category_name: input.category_name,
            name: input.name,
            img_url: input.img_url,
            description: input.description,
        }
    }
}

/// Request body for a partial update
///
/// Each field is tri-state: absent (`None`), explicit `null` (`Some(None)`)
/// or a value (`Some(Some(_))`). Only values are written; absent and null
/// fields leave the stored field untouched.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    #[schema(value_type = Option<String>)]
    pub category_name: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    #[schema(value_type = Option<String>)]
    pub name: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    #[schema(value_type = Option<String>)]
    pub img_url: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
}

/// The fields an update will actually write
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemChanges {
    pub category_name: Option<String>,
    pub name: Option<String>,
    pub img_url: Option<String>,
    pub description: Option<String>,
}

impl ItemChanges {
    pub fn is_empty(&self) -> bool {
        self.category_name.is_none()
            && self.name.is_none()
            && self.img_url.is_none()
            && self.description.is_none()
    }
}

impl ItemPatch {
    /// Resolve the patch into the set of fields to write
    ///
    /// Fails with `NoFieldsToUpdate` when nothing would be written, and with
    /// `InvalidPayload` when a required field would be blanked.
    pub fn into_changes(self) -> Result<ItemChanges, ItemError> {
        let changes = ItemChanges {
            category_name: required_value("categoryName", self.category_name)?,
            name: required_value("name", self.name)?,
            img_url: required_value("imgUrl", self.img_url)?,
            description: self.description.flatten(),
        };

        if changes.is_empty() {
            return Err(ItemError::NoFieldsToUpdate);
        }
        Ok(changes)
    }
}

fn required_value(
    field: &str,
    value: Option<Option<String>>,
) -> Result<Option<String>, ItemError> {
    match value.flatten() {
        Some(value) if value.is_empty() => Err(ItemError::InvalidPayload(format!(
            "{} must not be empty",
            field
        ))),
        other => Ok(other),
    }
}

/// Item as rendered at the API boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    /// 24 hex character object id
    pub id: String,
    pub category_name: String,
    pub name: String,
    pub img_url: String,
    /// Empty when the item has no description
    pub description: String,
}

impl ItemResponse {
    pub fn from_document(document: ItemDocument) -> Option<Self> {
        Some(Self {
            id: document.id?.to_hex(),
            category_name: document.category_name,
            name: document.name,
            img_url: document.img_url,
            description: document.description.unwrap_or_default(),
        })
    }
}

/// Response type for successful POST /items
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateItemResponse {
    pub success: bool,
    pub id: String,
    pub message: String,
}

/// Response type for successful PUT and DELETE operations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Response type for the health endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// `healthy` or `unhealthy`
    pub status: String,
    /// `connected` or `disconnected`
    pub database: String,
}
