//! Request extractors whose rejections go through [`AppError`], so malformed
//! bodies and path parameters produce the same JSON error shape as everything else.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// `axum::Json` with schema violations reported as `422 Unprocessable Entity`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ValidJson<T>(pub T);

/// `axum::extract::Path` with malformed parameters reported as `422`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ItemPath<T>(pub T);
