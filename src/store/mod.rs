use anyhow::Result;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::models::{ItemChanges, ItemDocument};

#[cfg(test)]
pub mod memory;
pub mod mongo;

pub use mongo::MongoItemStore;

/// Counts reported by the store for a single-document update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

/// Persistence for the items collection
///
/// Every method is a single store round trip; nothing is retried.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Insert a new item and return the id the store assigned
    async fn insert(&self, item: ItemDocument) -> Result<ObjectId>;

    /// All items in natural order, optionally restricted to one category
    async fn find_all(&self, category_name: Option<&str>) -> Result<Vec<ItemDocument>>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<ItemDocument>>;

    /// Write only the fields present in `changes`
    async fn update_by_id(&self, id: ObjectId, changes: &ItemChanges) -> Result<UpdateOutcome>;

    /// Returns the number of deleted documents (0 or 1)
    async fn delete_by_id(&self, id: ObjectId) -> Result<u64>;

    /// Liveness check against the database itself, not the collection
    async fn ping(&self) -> Result<()>;

    /// Release the underlying connection
    async fn shutdown(&self);
}
