use super::{decode_path, moved_permanently};
use crate::error::AppError;
use crate::state::StaticState;
use axum::extract::{Request, State};
use axum::http::Method;
use axum::response::{IntoResponse, Response};
use tower::ServiceExt;
use tracing::debug;

/// Redirects paths found in the route table; hands everything else to the
/// fallback router untouched.
pub async fn redirect_handler(State(state): State<StaticState>, request: Request) -> Response {
    if request.method() != Method::GET {
        return AppError::MethodNotAllowed.into_response();
    }

    let path = decode_path(request.uri().path()).into_owned();
    if let Some(url) = state.table.resolve(&path) {
        debug!(path = %path, url = %url, "redirecting mapped path");
        return moved_permanently(url);
    }

    debug!(path = %path, "path not mapped, using fallback");
    match state.fallback.oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    }
}
