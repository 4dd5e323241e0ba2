//! Item operations on top of an [`ItemStore`]

use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use std::time::Duration;
use validator::Validate;

use crate::error::ItemError;
use crate::models::{CreateItem, ItemDocument, ItemPatch, ItemResponse};
use crate::store::ItemStore;

/// Result of a successful update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStatus {
    Updated,
    /// The item exists but the submitted values matched what was stored
    NoChanges,
}

/// Database connectivity as seen by the health endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreHealth {
    Connected,
    Disconnected,
}

/// Longest the health check waits for a ping before reporting disconnected
pub const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(2);

/// Item service
///
/// Holds the store handle injected at startup. `None` means the startup
/// connection failed; every item operation then fails with
/// `ServiceUnavailable` without attempting any store access.
#[derive(Clone)]
pub struct ItemService {
    store: Option<Arc<dyn ItemStore>>,
    health_timeout: Duration,
}

impl ItemService {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self {
            store: Some(store),
            health_timeout: HEALTH_CHECK_TIMEOUT,
        }
    }

    /// A service running without a store connection
    pub fn disconnected() -> Self {
        Self {
            store: None,
            health_timeout: HEALTH_CHECK_TIMEOUT,
        }
    }

    /// Override how long the health check waits for a ping
    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    fn store(&self) -> Result<&dyn ItemStore, ItemError> {
        self.store.as_deref().ok_or(ItemError::ServiceUnavailable)
    }

    /// Check the connection, then the id syntax, without touching the store
    pub fn resolve_id(&self, id: &str) -> Result<ObjectId, ItemError> {
        self.store()?;
        parse_id(id)
    }

    pub async fn create(&self, input: CreateItem) -> Result<String, ItemError> {
        let store = self.store()?;
        input.validate()?;

        let id = store.insert(ItemDocument::from(input)).await?;

        tracing::info!("Created item with id: {}", id);
        Ok(id.to_hex())
    }

    pub async fn list_all(&self) -> Result<Vec<ItemResponse>, ItemError> {
        let documents = self.store()?.find_all(None).await?;
        render_all(documents)
    }

    /// Items whose `categoryName` equals `category_name` exactly (case-sensitive)
    pub async fn list_by_category(
        &self,
        category_name: &str,
    ) -> Result<Vec<ItemResponse>, ItemError> {
        let documents = self.store()?.find_all(Some(category_name)).await?;
        render_all(documents)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<ItemResponse, ItemError> {
        let object_id = self.resolve_id(id)?;
        let store = self.store()?;

        match store.find_by_id(object_id).await? {
            Some(document) => render(document),
            None => Err(ItemError::NotFound(id.to_string())),
        }
    }

    /// Apply a partial update
    ///
    /// When the store reports nothing modified the item is re-fetched: a
    /// missing item is `NotFound`, an existing one means the submitted
    /// values were already stored.
    pub async fn update_by_id(
        &self,
        id: &str,
        patch: ItemPatch,
    ) -> Result<UpdateStatus, ItemError> {
        let object_id = self.resolve_id(id)?;
        let store = self.store()?;
        let changes = patch.into_changes()?;

        let outcome = store.update_by_id(object_id, &changes).await?;
        if outcome.modified > 0 {
            tracing::info!("Updated item with id: {}", object_id);
            return Ok(UpdateStatus::Updated);
        }
        tracing::debug!(
            "Update of {} modified nothing (matched {}), re-checking existence",
            object_id,
            outcome.matched
        );

        match store.find_by_id(object_id).await? {
            Some(_) => {
                tracing::info!("Update left item {} unchanged", object_id);
                Ok(UpdateStatus::NoChanges)
            }
            None => Err(ItemError::NotFound(id.to_string())),
        }
    }

    pub async fn delete_by_id(&self, id: &str) -> Result<(), ItemError> {
        let object_id = self.resolve_id(id)?;
        let store = self.store()?;

        if store.delete_by_id(object_id).await? == 0 {
            return Err(ItemError::NotFound(id.to_string()));
        }

        tracing::info!("Deleted item with id: {}", object_id);
        Ok(())
    }

    /// Ping the database without touching the items collection
    pub async fn health_check(&self) -> StoreHealth {
        let Some(store) = self.store.as_deref() else {
            tracing::warn!("Health check: no database connection");
            return StoreHealth::Disconnected;
        };

        match tokio::time::timeout(self.health_timeout, store.ping()).await {
            Ok(Ok(())) => StoreHealth::Connected,
            Ok(Err(e)) => {
                tracing::error!("Health check failed: {:#}", e);
                StoreHealth::Disconnected
            }
            Err(_) => {
                tracing::error!(
                    "Health check failed: no ping response within {:?}",
                    self.health_timeout
                );
                StoreHealth::Disconnected
            }
        }
    }

    /// Close the store connection, if there is one
    pub async fn shutdown(&self) {
        if let Some(store) = self.store.as_deref() {
            store.shutdown().await;
        }
    }
}

fn parse_id(id: &str) -> Result<ObjectId, ItemError> {
    ObjectId::parse_str(id).map_err(|_| ItemError::InvalidId(id.to_string()))
}

fn render(document: ItemDocument) -> Result<ItemResponse, ItemError> {
    ItemResponse::from_document(document)
        .ok_or_else(|| ItemError::Database(anyhow::anyhow!("Stored item has no _id")))
}

fn render_all(documents: Vec<ItemDocument>) -> Result<Vec<ItemResponse>, ItemError> {
    documents.into_iter().map(render).collect()
}
