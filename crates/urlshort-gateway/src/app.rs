use crate::handlers::{
    health_handler, home_handler, missing_url_handler, redirect_handler, retrieve_handler,
    shorten_handler,
};
use crate::state::{DynamicState, StaticState};
use axum::http::StatusCode;
use axum::routing::{any, get};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use urlshort_core::short_key::SHORT_PATH_PREFIX;
use urlshort_core::RouteTable;
use urlshort_shortener::Shortener;

/// Body of the default static-mode fallback.
pub const HELLO: &str = "Hello, world!\n";

pub struct App {}

impl App {
    /// Router for config-driven redirects.
    ///
    /// Every path except `/health` goes through the route table; misses are
    /// forwarded to `fallback` as-is.
    pub fn static_router(table: Arc<RouteTable>, fallback: Router) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .fallback(redirect_handler)
            .with_state(StaticState::new(table, fallback))
    }

    /// The static-mode fallback used when none is supplied.
    pub fn hello_router() -> Router {
        Router::new().fallback(|| async { HELLO })
    }

    /// Router for the shortening form and store-backed redirects.
    pub fn dynamic_router(
        shortener: Arc<dyn Shortener>,
        public_base_url: impl Into<String>,
    ) -> Router {
        Router::new()
            .route("/", any(home_handler))
            .route("/health", get(health_handler))
            .route("/shorten", any(shorten_handler))
            .route(&format!("/{}/{{*key}}", SHORT_PATH_PREFIX), any(retrieve_handler))
            .fallback(missing_url_handler)
            .with_state(DynamicState::new(shortener, public_base_url))
    }

    /// Adds request tracing and a per-request deadline.
    pub fn with_layers(router: Router, request_timeout: Duration) -> Router {
        router
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                request_timeout,
            ))
            .layer(TraceLayer::new_for_http())
    }
}
