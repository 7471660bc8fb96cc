//! HTML pages rendered with askama.

use crate::error::Result;
use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomePage;

#[derive(Template)]
#[template(path = "shorten.html")]
pub struct ShortenPage<'a> {
    pub original_url: &'a str,
    pub short_url: &'a str,
}

/// Shown when a short key is unknown, malformed or expired.
#[derive(Template)]
#[template(path = "fallback.html")]
pub struct MissingUrlPage;

/// Shown when a submitted URL fails validation.
#[derive(Template)]
#[template(path = "error.html")]
pub struct InvalidUrlPage;

/// Renders `page` with the given status.
pub fn render(status: StatusCode, page: &impl Template) -> Result<Response> {
    let body = page.render()?;
    Ok((status, Html(body)).into_response())
}
