//! Token handling for the external identity provider.

pub mod jwt;
