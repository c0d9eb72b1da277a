//! Shared response envelope types for API handlers.
//!
//! Every API response uses the `{ "status", "message", "data" }` envelope.
//! Error responses are built by [`crate::error::AppError`] and add a `code`.

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

/// Standard success envelope.
///
/// ```ignore
/// Ok(ApiResponse::ok("Towers retrieved", towers))
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: &'static str,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 response carrying `data`.
    pub fn ok(message: impl Into<String>, data: T) -> Json<Self> {
        Json(Self {
            status: "success",
            message: message.into(),
            data,
        })
    }

    /// 201 response carrying the created resource.
    pub fn created(message: impl Into<String>, data: T) -> (StatusCode, Json<Self>) {
        (StatusCode::CREATED, Self::ok(message, data))
    }
}

impl ApiResponse<Option<()>> {
    /// 200 response with `"data": null`.
    pub fn message(message: impl Into<String>) -> Json<Self> {
        Self::ok(message, None)
    }
}
