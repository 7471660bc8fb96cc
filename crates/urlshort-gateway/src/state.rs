use axum::Router;
use std::sync::Arc;
use urlshort_core::RouteTable;
use urlshort_shortener::Shortener;

/// State of the config-driven redirect router.
#[derive(Clone)]
pub struct StaticState {
    pub(crate) table: Arc<RouteTable>,
    /// Receives every request whose path is not in `table`.
    pub(crate) fallback: Router,
}

impl StaticState {
    pub fn new(table: Arc<RouteTable>, fallback: Router) -> Self {
        Self { table, fallback }
    }
}

/// State of the store-backed router.
#[derive(Clone)]
pub struct DynamicState {
    pub(crate) shortener: Arc<dyn Shortener>,
    pub(crate) public_base_url: Arc<str>,
}

impl DynamicState {
    pub fn new(shortener: Arc<dyn Shortener>, public_base_url: impl Into<String>) -> Self {
        let public_base_url: String = public_base_url.into();
        Self {
            shortener,
            public_base_url: public_base_url.into(),
        }
    }
}
