//! Path and query extractors that reject with the standard error body.

use axum::extract::FromRequestParts;

use crate::errors::AppError;

/// `axum::extract::Path` rejecting with `AppError`
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Path<T>(pub T);

/// `axum::extract::Query` rejecting with `AppError`
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct Query<T>(pub T);
