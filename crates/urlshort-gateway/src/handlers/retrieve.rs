use super::{decode_path, moved_permanently};
use crate::error::{AppError, Result};
use crate::state::DynamicState;
use crate::view::{self, MissingUrlPage};
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::Response;
use tracing::debug;
use urlshort_shortener::ShortenerError;

/// `GET /{prefix}/{key}`: redirects to the stored destination.
pub async fn retrieve_handler(
    State(state): State<DynamicState>,
    method: Method,
    uri: Uri,
) -> Result<Response> {
    if method != Method::GET {
        return Err(AppError::MethodNotAllowed);
    }

    let path = decode_path(uri.path());
    let Some((_, key)) = path.trim_matches(['/', ' ']).split_once('/') else {
        return Err(AppError::NotFound);
    };

    match state.shortener.resolve(key).await {
        Ok(url) => Ok(moved_permanently(&url)),
        Err(ShortenerError::NotFound) => {
            debug!(key, "short key not found");
            view::render(StatusCode::NOT_FOUND, &MissingUrlPage)
        }
        Err(e) => Err(AppError::Retrieve(e)),
    }
}
