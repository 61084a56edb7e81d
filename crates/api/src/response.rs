//! Shared response envelope types for API handlers.
//!
//! All API responses use the `{ "success": true, "data": ... }` envelope.
//! Use [`ApiResponse`] instead of ad-hoc `serde_json::json!` so handlers get
//! compile-time type safety and consistent serialization. The failure side
//! of the envelope lives in [`crate::error`].

use serde::Serialize;

/// Standard `{ "success": true, "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(ApiResponse::new(items)))
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
