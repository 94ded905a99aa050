//! Record contract persisted by the item stores.
//!
//! A record carries a caller-supplied key, two store-managed timestamps, and
//! arbitrary domain fields persisted verbatim. The stores stamp both
//! timestamps on create (with one identical value) and refresh only the
//! update timestamp on update, so `createdAt <= updatedAt` holds for every
//! persisted record.

use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};

/// Attribute name under which implementations must serialize their creation
/// timestamp.
pub const CREATED_AT: &str = "createdAt";

/// Attribute name under which implementations must serialize their update
/// timestamp.
pub const UPDATED_AT: &str = "updatedAt";

/// Canonical timestamp format: ISO-8601 with fixed-width milliseconds, UTC.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Returns the current UTC time in the canonical timestamp format.
///
/// The format is fixed-width, so lexicographic order on rendered timestamps
/// matches chronological order.
pub fn timestamp() -> String {
    Utc::now().format(TIMESTAMP_FORMAT).to_string()
}

/// A record persisted by an item store.
///
/// The key uniquely identifies the record within its table; it is supplied by
/// the caller and immutable once created. The timestamps are managed by the
/// store: values supplied by the caller are ignored on create, and the
/// creation timestamp is never modified on update.
///
/// Implementations must serialize the timestamp accessors under the attribute
/// names [`CREATED_AT`] and [`UPDATED_AT`]; the update conditional expression
/// checks for the presence of [`CREATED_AT`] to verify existence.
pub trait Item: Serialize + DeserializeOwned + Send + Sync {
    /// The unique identifier of the record within its table.
    fn key(&self) -> &str;

    /// The creation timestamp, if the record has been persisted.
    fn created_at(&self) -> Option<&str>;

    /// The last-modification timestamp, if the record has been persisted.
    fn updated_at(&self) -> Option<&str>;

    /// Overwrites the creation timestamp.
    fn set_created_at(&mut self, timestamp: String);

    /// Overwrites the last-modification timestamp.
    fn set_updated_at(&mut self, timestamp: String);
}
