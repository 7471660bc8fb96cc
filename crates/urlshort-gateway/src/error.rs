use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;
use urlshort_shortener::ShortenerError;

pub type Result<T> = std::result::Result<T, AppError>;

/// Errors that end a request with a plain-text body.
///
/// Server-side failures keep their cause for the log; the client only sees
/// the generic message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid request method")]
    MethodNotAllowed,
    #[error("URL parameter is missing")]
    MissingUrl,
    #[error("Not Found")]
    NotFound,
    #[error("error saving short url")]
    Save(#[source] ShortenerError),
    #[error("error retrieving short url")]
    Retrieve(#[source] ShortenerError),
    #[error("error rendering page")]
    Render(#[from] askama::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::MissingUrl => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Save(_) | AppError::Retrieve(_) | AppError::Render(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Save(source) | AppError::Retrieve(source) => {
                error!(error = %source, "{}", self);
            }
            AppError::Render(source) => {
                error!(error = %source, "{}", self);
            }
            _ => {}
        }
        (status, format!("{}\n", self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use urlshort_core::StorageError;

    #[test]
    fn status_codes() {
        assert_eq!(AppError::MethodNotAllowed.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(AppError::MissingUrl.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Save(ShortenerError::KeysExhausted { attempts: 5 }).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn storage_detail_stays_out_of_the_message() {
        let err = AppError::Retrieve(ShortenerError::Storage(StorageError::Unavailable(
            "redis://secret@host".to_string(),
        )));
        assert_eq!(err.to_string(), "error retrieving short url");
    }
}
