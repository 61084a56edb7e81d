//! Cache-invalidation event plumbing.
//!
//! Every successful mutation publishes a [`DomainEvent`] naming the
//! invalidation topics whose cached views are now stale. Consumers (the
//! presentation layer, log taps) subscribe through the [`EventBus`]; the
//! mutation core never pushes data, only staleness signals.
//!
//! - [`EventBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`DomainEvent`] — the canonical event envelope.
//! - [`topics`] — constructors for the well-known topic names.

pub mod bus;
pub mod topics;

pub use bus::{DomainEvent, EventBus};
