//! The hello world responder
//!
//! Every request gets `200 OK` with the body `hello world`. Method, path,
//! headers and body are never looked at.

use axum::{http::header::CONTENT_TYPE, response::IntoResponse, Router};

/// Body written for every request
pub const HELLO_BODY: &str = "hello world";

/// Catch-all handler
async fn hello() -> impl IntoResponse {
    ([(CONTENT_TYPE, "text/plain; charset=utf-8")], HELLO_BODY)
}

/// Build the router
///
/// There are no routes; the fallback answers everything, `/` included.
pub fn build_router() -> Router {
    Router::new().fallback(hello)
}
