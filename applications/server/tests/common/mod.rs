//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{body::Body, http::Request, response::Response, Router};
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt;
use tubecast_metadata::{OEmbedResolver, ResolverConfig};
use tubecast_server::{create_router, AppState};
use wiremock::MockServer;

/// Router whose resolver talks to `provider`
pub fn app_for(provider: &MockServer) -> Router {
    let resolver = OEmbedResolver::new(ResolverConfig::new(provider.uri())).unwrap();
    create_router(AppState::new(Arc::new(resolver)))
}

/// Issue a GET and return the response
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body as JSON
pub async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub mod fixtures {
    pub const VIDEO_ID: &str = "dQw4w9WgXcQ";
    pub const TITLE: &str = "Never Gonna Give You Up";
    pub const AUTHOR: &str = "Rick Astley";
}
