//! Request routing from structured events to item store operations.
//!
//! The router owns no state across invocations: each inbound event is decoded
//! into the shape one operation expects, dispatched onto the injected item
//! store, and the outcome is encoded as exactly one structured response.
//! Every error is converted at this boundary; none propagate further.

/// Canonical inbound event and structured response types.
pub mod event;

/// Operation selection and dispatch onto an item store.
pub mod handler;
