use crate::{error, item, store};

use indexmap::IndexMap;
use std::sync;

/// In-memory item store mirroring the conditional semantics of the
/// DynamoDB-backed service, for local runs and tests.
///
/// Records are kept in insertion order, which stands in for the table's
/// native storage order: listing walks that order and resumes after the
/// cursor key, so pagination behaves like a keyset scan. A cursor whose key
/// no longer exists ends the listing.
#[derive(Debug)]
pub struct MemoryStore<T> {
    items: sync::Mutex<IndexMap<String, T>>,
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MemoryStore<T> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            items: sync::Mutex::new(IndexMap::new()),
        }
    }

    fn lock(&self) -> sync::MutexGuard<'_, IndexMap<String, T>> {
        self.items
            .lock()
            .unwrap_or_else(sync::PoisonError::into_inner)
    }
}

impl<T: item::Item + Clone> store::ItemStore for MemoryStore<T> {
    type Item = T;

    async fn create(&self, mut item: T) -> error::Result<T> {
        let key = item.key().to_string();
        if key.is_empty() {
            return Err(error::Error::validation("item key must not be empty"));
        }
        let now = item::timestamp();
        item.set_created_at(now.clone());
        item.set_updated_at(now);
        let mut items = self.lock();
        if items.contains_key(&key) {
            return Err(error::Error::Conflict(key));
        }
        items.insert(key, item.clone());
        Ok(item)
    }

    async fn read(&self, key: &str) -> error::Result<T> {
        if key.is_empty() {
            return Err(error::Error::validation("item key must not be empty"));
        }
        self.lock()
            .get(key)
            .cloned()
            .ok_or_else(|| error::Error::NotFound(key.to_string()))
    }

    async fn update(&self, mut item: T) -> error::Result<T> {
        let key = item.key().to_string();
        if key.is_empty() {
            return Err(error::Error::validation("item key must not be empty"));
        }
        let mut items = self.lock();
        // Existence is verified by the presence of the creation timestamp,
        // matching the conditional expression of the DynamoDB service.
        let created_at = match items.get(&key).and_then(|existing| existing.created_at()) {
            Some(created_at) => created_at.to_string(),
            None => return Err(error::Error::NotFound(key)),
        };
        item.set_created_at(created_at);
        item.set_updated_at(item::timestamp());
        items.insert(key, item.clone());
        Ok(item)
    }

    async fn delete(&self, key: &str) -> error::Result<()> {
        if key.is_empty() {
            return Err(error::Error::validation("item key must not be empty"));
        }
        self.lock().shift_remove(key);
        Ok(())
    }

    async fn list(
        &self,
        cursor: Option<&str>,
        limit: Option<i32>,
    ) -> error::Result<store::Page<T>> {
        if matches!(limit, Some(limit) if limit < 1) {
            return Err(error::Error::validation("limit must be at least 1"));
        }
        let items = self.lock();
        let start = match cursor {
            Some(cursor) => match items.get_index_of(cursor) {
                Some(index) => index + 1,
                None => {
                    return Ok(store::Page {
                        items: Vec::new(),
                        last_evaluated_key: None,
                    });
                }
            },
            None => 0,
        };
        let count = match limit {
            Some(limit) => limit as usize,
            None => usize::MAX,
        };
        let page: Vec<T> = items.values().skip(start).take(count).cloned().collect();
        let last_evaluated_key = if start + page.len() < items.len() {
            page.last().map(|item| item.key().to_string())
        } else {
            None
        };
        Ok(store::Page {
            items: page,
            last_evaluated_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ItemStore;

    use rstest::rstest;
    use serde::{Deserialize, Serialize};
    use std::collections;

    #[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Product {
        sku: String,
        name: String,
        description: String,
        created_at: Option<String>,
        updated_at: Option<String>,
    }

    impl item::Item for Product {
        fn key(&self) -> &str {
            &self.sku
        }

        fn created_at(&self) -> Option<&str> {
            self.created_at.as_deref()
        }

        fn updated_at(&self) -> Option<&str> {
            self.updated_at.as_deref()
        }

        fn set_created_at(&mut self, timestamp: String) {
            self.created_at = Some(timestamp);
        }

        fn set_updated_at(&mut self, timestamp: String) {
            self.updated_at = Some(timestamp);
        }
    }

    fn product(sku: &str, name: &str) -> Product {
        Product {
            sku: sku.to_string(),
            name: name.to_string(),
            description: "A widget".to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_read_round_trip() {
        let store = MemoryStore::new();
        let created = store.create(product("sku-1", "Widget")).await.unwrap();
        assert!(created.created_at.is_some());
        assert_eq!(created.created_at, created.updated_at);
        let read = store.read("sku-1").await.unwrap();
        assert_eq!(read, created);
    }

    #[tokio::test]
    async fn test_create_conflict_leaves_first_record() {
        let store = MemoryStore::new();
        store.create(product("sku-1", "Widget")).await.unwrap();
        let second = store.create(product("sku-1", "Gadget")).await;
        assert_eq!(second, Err(error::Error::Conflict("sku-1".to_string())));
        let read = store.read("sku-1").await.unwrap();
        assert_eq!(read.name, "Widget");
    }

    #[tokio::test]
    async fn test_create_rejects_empty_key() {
        let store = MemoryStore::new();
        let result = store.create(product("", "Widget")).await;
        assert!(matches!(result, Err(error::Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_read_missing_is_not_found() {
        let store: MemoryStore<Product> = MemoryStore::new();
        let result = store.read("sku-1").await;
        assert_eq!(result, Err(error::Error::NotFound("sku-1".to_string())));
    }

    #[tokio::test]
    async fn test_update_requires_existence() {
        let store = MemoryStore::new();
        let result = store.update(product("sku-1", "Widget")).await;
        assert_eq!(result, Err(error::Error::NotFound("sku-1".to_string())));
    }

    #[tokio::test]
    async fn test_update_refreshes_timestamps_and_fields() {
        let store = MemoryStore::new();
        let created = store.create(product("sku-1", "Widget")).await.unwrap();
        let updated = store.update(product("sku-1", "Widget v2")).await.unwrap();
        assert_eq!(updated.name, "Widget v2");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryStore::new();
        store.create(product("sku-1", "Widget")).await.unwrap();
        store.delete("sku-1").await.unwrap();
        store.delete("sku-1").await.unwrap();
        let read = store.read("sku-1").await;
        assert_eq!(read, Err(error::Error::NotFound("sku-1".to_string())));
    }

    #[tokio::test]
    async fn test_list_without_limit_returns_everything() {
        let store = MemoryStore::new();
        for index in 0..5 {
            let sku = format!("sku-{index}");
            store.create(product(&sku, "Widget")).await.unwrap();
        }
        let page = store.list(None, None).await.unwrap();
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.last_evaluated_key, None);
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let store = MemoryStore::new();
        for sku in ["sku-2", "sku-0", "sku-1"] {
            store.create(product(sku, "Widget")).await.unwrap();
        }
        let page = store.list(None, None).await.unwrap();
        let keys: Vec<&str> = page.items.iter().map(|item| item.sku.as_str()).collect();
        assert_eq!(keys, ["sku-2", "sku-0", "sku-1"]);
    }

    #[tokio::test]
    async fn test_list_rejects_non_positive_limit() {
        let store: MemoryStore<Product> = MemoryStore::new();
        let result = store.list(None, Some(0)).await;
        assert!(matches!(result, Err(error::Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_unknown_cursor_ends_listing() {
        let store = MemoryStore::new();
        store.create(product("sku-1", "Widget")).await.unwrap();
        let page = store.list(Some("sku-9"), None).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.last_evaluated_key, None);
    }

    #[rstest]
    #[case::limit_one(1)]
    #[case::limit_two(2)]
    #[case::limit_three(3)]
    #[case::limit_beyond_table(10)]
    #[tokio::test]
    async fn test_pagination_is_complete(#[case] limit: i32) {
        let store = MemoryStore::new();
        for index in 0..5 {
            let sku = format!("sku-{index}");
            store.create(product(&sku, "Widget")).await.unwrap();
        }
        let mut seen = collections::HashSet::new();
        let mut cursor: Option<String> = None;
        loop {
            let page = store.list(cursor.as_deref(), Some(limit)).await.unwrap();
            assert!(page.items.len() <= limit as usize);
            for item in &page.items {
                assert!(seen.insert(item.sku.clone()), "duplicate {}", item.sku);
            }
            match page.last_evaluated_key {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }
        assert_eq!(seen.len(), 5);
    }
}
