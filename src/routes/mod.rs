//! Router assembly: API routes, common routes, CORS, request tracing, JSON 404 fallback.

mod common;
mod trivia;

pub use common::common_routes;
pub use trivia::trivia_routes;

use crate::error::AppError;
use crate::state::AppState;
use axum::http::{header, Method, Uri};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// The complete application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(trivia_routes(state))
        .fallback(fallback)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

/// Any origin; content-type and authorization headers; GET, POST, PATCH, DELETE, OPTIONS.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
}

async fn fallback(uri: Uri) -> AppError {
    AppError::NotFound(format!("no route for {}", uri))
}
