mod health;
mod pages;
mod redirect;
mod retrieve;
mod shorten;

pub use health::health_handler;
pub use pages::{home_handler, missing_url_handler};
pub use redirect::redirect_handler;
pub use retrieve::retrieve_handler;
pub use shorten::shorten_handler;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use std::borrow::Cow;

/// `301 Moved Permanently` to `location`.
pub(crate) fn moved_permanently(location: &str) -> Response {
    (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response()
}

/// Percent-decodes a request path, keeping the raw text if it is not UTF-8.
pub(crate) fn decode_path(path: &str) -> Cow<'_, str> {
    urlencoding::decode(path).unwrap_or(Cow::Borrowed(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_escaped_whitespace() {
        assert_eq!(decode_path("/urlshort-final/%20%20"), "/urlshort-final/  ");
        assert_eq!(decode_path("/plain"), "/plain");
    }

    #[test]
    fn keeps_invalid_utf8_escapes_verbatim() {
        assert_eq!(decode_path("/bad%FF"), "/bad%FF");
    }

    #[test]
    fn redirect_is_301_with_location() {
        let response = moved_permanently("https://example.com");
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.headers()[header::LOCATION], "https://example.com");
    }
}
