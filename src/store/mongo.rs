use anyhow::{Context, Result};
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use std::time::Duration;

use super::{ItemStore, UpdateOutcome};
use crate::config::Config;
use crate::models::{ItemChanges, ItemDocument};

/// MongoDB-backed item store
///
/// Cloning is cheap: the driver client is itself a shared handle onto one
/// connection pool.
#[derive(Clone)]
pub struct MongoItemStore {
    client: Client,
    database: Database,
    collection: Collection<ItemDocument>,
}

impl MongoItemStore {
    /// Connect to MongoDB using the provided config
    ///
    /// The driver connects lazily, so this issues a `ping` against the
    /// configured database before returning. A store that cannot be pinged
    /// is reported as an error rather than handed out.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let mut options = ClientOptions::parse(&config.mongodb_uri)
            .await
            .context("Failed to parse MongoDB connection string")?;

        options.connect_timeout = Some(Duration::from_secs(config.mongodb_connect_timeout_secs));
        options.server_selection_timeout = Some(Duration::from_secs(
            config.mongodb_server_selection_timeout_secs,
        ));
        if let Some(app_name) = &config.mongodb_app_name {
            options.app_name = Some(app_name.clone());
        }

        let client = Client::with_options(options).context("Failed to create MongoDB client")?;
        let database = client.database(&config.mongodb_database);
        let collection = database.collection::<ItemDocument>(&config.mongodb_collection);

        let store = Self {
            client,
            database,
            collection,
        };
        store.ping().await?;

        tracing::info!(
            "Successfully connected to MongoDB database: {} (collection: {})",
            config.mongodb_database,
            config.mongodb_collection
        );

        Ok(store)
    }
}

/// Filter matching one document by its object id
fn id_filter(id: ObjectId) -> Document {
    doc! { "_id": id }
}

/// Filter for `find_all`: everything, or an exact category match
fn category_filter(category_name: Option<&str>) -> Document {
    match category_name {
        Some(category_name) => doc! { "categoryName": category_name },
        None => doc! {},
    }
}

/// Build the `$set` body for an update, containing only the fields to write
fn set_document(changes: &ItemChanges) -> Document {
    let mut set = Document::new();

    if let Some(category_name) = &changes.category_name {
        set.insert("categoryName", category_name.as_str());
    }
    if let Some(name) = &changes.name {
        set.insert("name", name.as_str());
    }
    if let Some(img_url) = &changes.img_url {
        set.insert("imgUrl", img_url.as_str());
    }
    if let Some(description) = &changes.description {
        set.insert("description", description.as_str());
    }

    set
}

#[async_trait]
impl ItemStore for MongoItemStore {
    async fn insert(&self, item: ItemDocument) -> Result<ObjectId> {
        let result = self
            .collection
            .insert_one(&item)
            .await
            .context("Failed to insert item into MongoDB")?;

        let id = result
            .inserted_id
            .as_object_id()
            .context("MongoDB returned a non-ObjectId _id for the inserted item")?;

        tracing::debug!("Inserted item with id: {}", id);
        Ok(id)
    }

    async fn find_all(&self, category_name: Option<&str>) -> Result<Vec<ItemDocument>> {
        let cursor = self
            .collection
            .find(category_filter(category_name))
            .await
            .context("Failed to query items from MongoDB")?;

        let items: Vec<ItemDocument> = cursor
            .try_collect()
            .await
            .context("Failed to read items from MongoDB cursor")?;

        tracing::debug!("Read {} items (category: {:?})", items.len(), category_name);
        Ok(items)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<ItemDocument>> {
        let item = self
            .collection
            .find_one(id_filter(id))
            .await
            .context("Failed to query item from MongoDB")?;

        if item.is_none() {
            tracing::debug!("Item not found with id: {}", id);
        }
        Ok(item)
    }

    async fn update_by_id(&self, id: ObjectId, changes: &ItemChanges) -> Result<UpdateOutcome> {
        let update = doc! { "$set": set_document(changes) };

        let result = self
            .collection
            .update_one(id_filter(id), update)
            .await
            .context("Failed to update item in MongoDB")?;

        tracing::debug!(
            "Updated item {}: matched {}, modified {}",
            id,
            result.matched_count,
            result.modified_count
        );
        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<u64> {
        let result = self
            .collection
            .delete_one(id_filter(id))
            .await
            .context("Failed to delete item from MongoDB")?;

        tracing::debug!("Deleted {} item(s) with id: {}", result.deleted_count, id);
        Ok(result.deleted_count)
    }

    async fn ping(&self) -> Result<()> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .context("Failed to ping MongoDB")?;

        tracing::debug!("MongoDB ping succeeded");
        Ok(())
    }

    async fn shutdown(&self) {
        self.client.clone().shutdown().await;
        tracing::info!("MongoDB connection closed");
    }
}
