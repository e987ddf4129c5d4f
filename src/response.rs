//! Success envelope: every 200 body is `{"success": true, ...fields}`.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct Success<T> {
    pub success: bool,
    #[serde(flatten)]
    pub body: T,
}

pub fn success_ok<T: Serialize>(body: T) -> (StatusCode, Json<Success<T>>) {
    (StatusCode::OK, Json(Success { success: true, body }))
}
