//! Extractors whose rejections use the JSON error envelope.
//!
//! axum's own `Json` and `Path` reject with plain-text bodies. These wrappers
//! route the rejection through [`AppError`] instead, so a malformed body or a
//! non-numeric id gets the same `{status, message, code, data}` shape as
//! every other failure.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON request body.
///
/// ```ignore
/// async fn relocate(AppJson(input): AppJson<RelocateRequest>) -> AppResult<..>
/// ```
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Typed path parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
