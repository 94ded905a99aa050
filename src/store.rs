//! Item stores over one logical table.
//!
//! A store performs the five operations of the service (create, read, update,
//! delete, list) for one record type against one table. The contract is the
//! [`ItemStore`] trait, the dependency-injection seam the router is generic
//! over: the DynamoDB-backed [`dynamodb::ItemService`] is the production
//! implementation, and [`memory::MemoryStore`] mirrors its conditional
//! semantics in process memory for local runs and tests.

/// DynamoDB-backed item store.
pub mod dynamodb;

/// In-memory item store with the same conditional semantics.
pub mod memory;

use crate::{error, item};

use serde::Serialize;

/// One page of a table listing.
///
/// Items appear in the table's native storage order, not in any domain order.
/// The cursor is opaque: callers round-trip it unmodified into the next
/// [`ItemStore::list`] call, and `None` marks the end of the table.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// The records of this page.
    pub items: Vec<T>,
    /// Cursor to resume the listing, `None` once the table is exhausted.
    pub last_evaluated_key: Option<String>,
}

/// Store contract for one record type over one logical table.
///
/// Implementations enforce the existence invariants server-side (or
/// equivalently, atomically): create fails on a key that already exists,
/// update fails on a key that was never created, and neither performs a read
/// before the write to check existence.
#[allow(async_fn_in_trait)]
pub trait ItemStore {
    /// The record type persisted by this store.
    type Item: item::Item;

    /// Persists a new record, stamping both timestamps with one identical
    /// value, and returns the canonical persisted representation.
    ///
    /// Fails with [`error::Error::Conflict`] if a record with the same key
    /// already exists.
    async fn create(&self, item: Self::Item) -> error::Result<Self::Item>;

    /// Point lookup by key.
    ///
    /// Fails with [`error::Error::NotFound`] if no record exists for `key`.
    async fn read(&self, key: &str) -> error::Result<Self::Item>;

    /// Overwrites the domain fields of an existing record, refreshes its
    /// update timestamp, leaves its creation timestamp untouched, and returns
    /// the canonical persisted representation.
    ///
    /// Fails with [`error::Error::NotFound`] if the record was never created.
    async fn update(&self, item: Self::Item) -> error::Result<Self::Item>;

    /// Removes the record for `key`; deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> error::Result<()>;

    /// Returns at most `limit` records starting after `cursor`, along with
    /// the cursor for the next page.
    async fn list(
        &self,
        cursor: Option<&str>,
        limit: Option<i32>,
    ) -> error::Result<Page<Self::Item>>;
}

impl<S: ItemStore> ItemStore for &S {
    type Item = S::Item;

    async fn create(&self, item: Self::Item) -> error::Result<Self::Item> {
        (**self).create(item).await
    }

    async fn read(&self, key: &str) -> error::Result<Self::Item> {
        (**self).read(key).await
    }

    async fn update(&self, item: Self::Item) -> error::Result<Self::Item> {
        (**self).update(item).await
    }

    async fn delete(&self, key: &str) -> error::Result<()> {
        (**self).delete(key).await
    }

    async fn list(
        &self,
        cursor: Option<&str>,
        limit: Option<i32>,
    ) -> error::Result<Page<Self::Item>> {
        (**self).list(cursor, limit).await
    }
}
