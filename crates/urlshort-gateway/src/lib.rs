//! HTTP surface of the urlshort service.
//!
//! Two routers are exposed. [`App::static_router`] answers from an
//! immutable [`RouteTable`](urlshort_core::RouteTable) loaded at startup;
//! [`App::dynamic_router`] serves the shortening form and resolves keys
//! through a [`Shortener`](urlshort_shortener::Shortener).

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod source;
pub mod state;
pub mod view;

pub use app::App;
pub use error::{AppError, Result};
pub use source::{MappingSource, SourceError};
pub use state::{DynamicState, StaticState};
