#![deny(missing_docs)]
#![deny(warnings)]

//! # DynamoDB Item Service
//!
//! A generic, type-safe item service for single-table CRUD over Amazon DynamoDB,
//! plus a request router that maps API Gateway style events onto it.
//!
//! ## Overview
//!
//! This library provides two layered components:
//! - An **item store**: a service parameterized by a record type that performs
//!   create, read, update, delete, and cursor-paginated list operations against
//!   one logical table. Existence invariants (create-only-if-absent,
//!   update-only-if-present) are enforced server-side through conditional
//!   writes; the store never reads before writing.
//! - A **request router**: a dispatcher that decodes a structured event into
//!   the shape one operation expects, invokes the store, and encodes the
//!   outcome as a structured response with a consistent error-to-status
//!   mapping.
//!
//! ## Quick Example
//!
//! ```rust,no_run
//! use aws_sdk_dynamodb::Client;
//! use dynamodb_item_service::{item, store, store::ItemStore};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Clone, Debug, Deserialize, Serialize)]
//! #[serde(rename_all = "camelCase")]
//! struct Product {
//!     sku: String,
//!     name: String,
//!     description: String,
//!     created_at: Option<String>,
//!     updated_at: Option<String>,
//! }
//!
//! impl item::Item for Product {
//!     fn key(&self) -> &str {
//!         &self.sku
//!     }
//!     fn created_at(&self) -> Option<&str> {
//!         self.created_at.as_deref()
//!     }
//!     fn updated_at(&self) -> Option<&str> {
//!         self.updated_at.as_deref()
//!     }
//!     fn set_created_at(&mut self, timestamp: String) {
//!         self.created_at = Some(timestamp);
//!     }
//!     fn set_updated_at(&mut self, timestamp: String) {
//!         self.updated_at = Some(timestamp);
//!     }
//! }
//!
//! # async fn example(client: Client) -> Result<(), dynamodb_item_service::error::Error> {
//! let service: store::dynamodb::ItemService<Product> =
//!     store::dynamodb::ItemService::new(client, "products", "sku");
//! let product = Product {
//!     sku: "sku-1".to_string(),
//!     name: "Widget".to_string(),
//!     description: "A widget".to_string(),
//!     created_at: None,
//!     updated_at: None,
//! };
//! service.create(product).await?;
//! service.list(None, Some(10)).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`mod@item`] - The record contract persisted by the item stores
//! - [`mod@store`] - The DynamoDB-backed store and an in-memory counterpart
//! - [`mod@router`] - Event decoding, dispatch, and response encoding
//! - [`mod@config`] - Environment-based startup configuration
//! - [`mod@error`] - The error taxonomy and its HTTP status mapping

/// Startup configuration consumed from the process environment.
pub mod config;

/// The error taxonomy shared by the stores and the router.
pub mod error;

/// The record contract persisted by the item stores.
pub mod item;

/// Request routing from structured events to item store operations.
///
/// This module provides:
/// - The canonical inbound event and structured response types
/// - One-dispatch-per-invocation routing onto an injected item store
pub mod router;

/// Item stores over one logical table.
///
/// This module provides:
/// - The store contract the router is generic over
/// - The DynamoDB-backed item service
/// - An insertion-ordered in-memory store with the same semantics
pub mod store;
