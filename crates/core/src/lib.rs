//! Shared domain building blocks for the Lollyshoppe backend.
//!
//! - [`types`] — id and timestamp aliases used by every crate.
//! - [`status`] — role and status enums matching the database enum types.
//! - [`error`] — the domain error taxonomy ([`error::CoreError`]).
//! - [`summary`] — pure aggregation helpers recomputed per request.

pub mod error;
pub mod status;
pub mod summary;
pub mod types;
