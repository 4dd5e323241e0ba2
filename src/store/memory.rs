use anyhow::{bail, Result};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

use super::{ItemStore, UpdateOutcome};
use crate::models::{ItemChanges, ItemDocument};

/// In-process item store for tests
///
/// Iterates in insertion order and reports `modified: 0` when every written
/// value already matched, the way MongoDB does for a no-op `$set`.
#[derive(Default)]
pub struct MemoryItemStore {
    items: RwLock<Vec<ItemDocument>>,
    unreachable: AtomicBool,
    ping_delay_ms: AtomicU64,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail as if the network dropped
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    /// Make `ping` hang for `delay` before answering
    pub fn set_ping_delay(&self, delay: Duration) {
        self.ping_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    fn check_reachable(&self) -> Result<()> {
        if self.unreachable.load(Ordering::SeqCst) {
            bail!("connection refused");
        }
        Ok(())
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn insert(&self, mut item: ItemDocument) -> Result<ObjectId> {
        self.check_reachable()?;
        let id = ObjectId::new();
        item.id = Some(id);
        self.items.write().await.push(item);
        Ok(id)
    }

    async fn find_all(&self, category_name: Option<&str>) -> Result<Vec<ItemDocument>> {
        self.check_reachable()?;
        let items = self.items.read().await;
        Ok(items
            .iter()
            .filter(|item| category_name.is_none_or(|category| item.category_name == category))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<ItemDocument>> {
        self.check_reachable()?;
        let items = self.items.read().await;
        Ok(items.iter().find(|item| item.id == Some(id)).cloned())
    }

    async fn update_by_id(&self, id: ObjectId, changes: &ItemChanges) -> Result<UpdateOutcome> {
        self.check_reachable()?;
        let mut items = self.items.write().await;
        match items.iter_mut().find(|item| item.id == Some(id)) {
            Some(item) => Ok(UpdateOutcome {
                matched: 1,
                modified: u64::from(apply_changes(item, changes)),
            }),
            None => Ok(UpdateOutcome {
                matched: 0,
                modified: 0,
            }),
        }
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<u64> {
        self.check_reachable()?;
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|item| item.id != Some(id));
        Ok((before - items.len()) as u64)
    }

    async fn ping(&self) -> Result<()> {
        let delay = self.ping_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        self.check_reachable()
    }

    async fn shutdown(&self) {}
}

/// Write `changes` into `item`, returning whether any field actually changed
fn apply_changes(item: &mut ItemDocument, changes: &ItemChanges) -> bool {
    let mut modified = false;

    if let Some(category_name) = &changes.category_name {
        modified |= replace_if_different(&mut item.category_name, category_name);
    }
    if let Some(name) = &changes.name {
        modified |= replace_if_different(&mut item.name, name);
    }
    if let Some(img_url) = &changes.img_url {
        modified |= replace_if_different(&mut item.img_url, img_url);
    }
    if let Some(description) = &changes.description {
        if item.description.as_ref() != Some(description) {
            item.description = Some(description.clone());
            modified = true;
        }
    }

    modified
}

fn replace_if_different(field: &mut String, value: &str) -> bool {
    if field == value {
        return false;
    }
    *field = value.to_string();
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cola() -> ItemDocument {
        ItemDocument {
            id: Some(ObjectId::new()),
            category_name: "Drinks".to_string(),
            name: "Cola".to_string(),
            img_url: "http://x/c.png".to_string(),
            description: None,
        }
    }

    #[test]
    fn test_apply_changes_reports_modification() {
        let mut item = cola();
        let same = ItemChanges {
            name: Some("Cola".to_string()),
            ..Default::default()
        };
        assert!(!apply_changes(&mut item, &same));

        let renamed = ItemChanges {
            name: Some("Cola Zero".to_string()),
            description: Some("no sugar".to_string()),
            ..Default::default()
        };
        assert!(apply_changes(&mut item, &renamed));
        assert_eq!(item.name, "Cola Zero");
        assert_eq!(item.description.as_deref(), Some("no sugar"));
        assert_eq!(item.category_name, "Drinks");
    }

    #[tokio::test]
    async fn test_update_of_missing_item_matches_nothing() {
        let store = MemoryItemStore::new();
        let changes = ItemChanges {
            name: Some("Cola".to_string()),
            ..Default::default()
        };

        let outcome = store.update_by_id(ObjectId::new(), &changes).await.unwrap();
        assert_eq!(outcome, UpdateOutcome { matched: 0, modified: 0 });
    }
}
