use crate::error::{AppError, Result};
use crate::view::{self, HomePage, MissingUrlPage};
use axum::http::{Method, StatusCode};
use axum::response::Response;

/// `GET /`: the shortening form.
pub async fn home_handler(method: Method) -> Result<Response> {
    if method != Method::GET {
        return Err(AppError::MethodNotAllowed);
    }
    view::render(StatusCode::OK, &HomePage)
}

/// Fallback of the dynamic router.
pub async fn missing_url_handler() -> Result<Response> {
    view::render(StatusCode::NOT_FOUND, &MissingUrlPage)
}
