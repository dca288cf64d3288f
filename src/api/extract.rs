use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Query},
};

use crate::error::BlindifyError;

/// `Json` extractor whose rejections render as `{ "error": ... }`.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(BlindifyError))]
pub struct ApiJson<T>(pub T);

/// `Query` extractor whose rejections render as `{ "error": ... }`.
#[derive(FromRequestParts)]
#[from_request(via(Query), rejection(BlindifyError))]
pub struct ApiQuery<T>(pub T);
