//! Error taxonomy shared by the item stores and the request router.
//!
//! Every failure a store or the router can produce is one of the variants
//! below, and each variant maps to exactly one HTTP status code via
//! [`Error::status_code`]. Nothing in this crate propagates an error past the
//! router boundary; the handler converts every error into a structured
//! response.

use std::{fmt, result};

/// Result alias for operations of this crate.
pub type Result<T> = result::Result<T, Error>;

/// Failure of an item store operation, request decoding, or startup
/// configuration.
///
/// SDK service errors are classified at the store boundary: a conditional
/// check failure on create becomes [`Error::Conflict`], on update it becomes
/// [`Error::NotFound`], and every other transport or serialization failure
/// from the external store becomes [`Error::Database`].
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// Malformed or missing request input.
    #[error("invalid request: {0}")]
    Validation(String),
    /// Create attempted on a key that already exists.
    #[error("item already exists: {0}")]
    Conflict(String),
    /// Read or update referenced a key that does not exist.
    #[error("item not found: {0}")]
    NotFound(String),
    /// Transport, throttling, or serialization failure from the external
    /// store.
    #[error("database operation failed: {0}")]
    Database(String),
    /// A required environment variable is absent; fatal at startup.
    #[error("environment variable `{0}` is not set")]
    Environment(&'static str),
    /// The handler selector names none of the five operations; fatal at
    /// startup.
    #[error("unsupported handler operation: {0}")]
    UnknownOperation(String),
}

impl Error {
    /// The HTTP status code this error surfaces as.
    ///
    /// The mapping is uniform across operations: validation failures are 400,
    /// conflicts are 409, missing items are 404, and everything else is 500.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Conflict(_) => 409,
            Self::Database(_) | Self::Environment(_) | Self::UnknownOperation(_) => 500,
        }
    }

    pub(crate) fn database(source: impl fmt::Display) -> Self {
        Self::Database(source.to_string())
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
