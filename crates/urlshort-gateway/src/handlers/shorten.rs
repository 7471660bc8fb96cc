use crate::error::{AppError, Result};
use crate::model::ShortenForm;
use crate::state::DynamicState;
use crate::view::{self, InvalidUrlPage, ShortenPage};
use axum::extract::{Form, FromRequest, Query, Request, State};
use axum::http::{Method, StatusCode};
use axum::response::Response;
use tracing::{debug, info};
use urlshort_shortener::ShortenerError;

/// `POST /shorten`: stores the submitted `url` under a fresh key.
///
/// The field is read from a form-encoded body first and from the query
/// string otherwise.
pub async fn shorten_handler(
    State(state): State<DynamicState>,
    request: Request,
) -> Result<Response> {
    if request.method() != Method::POST {
        return Err(AppError::MethodNotAllowed);
    }

    let from_query = Query::<ShortenForm>::try_from_uri(request.uri())
        .map(|Query(form)| form)
        .unwrap_or_default();
    let from_body = match Form::<ShortenForm>::from_request(request, &state).await {
        Ok(Form(form)) => form,
        Err(rejection) => {
            debug!(error = %rejection, "no form body in shorten request");
            ShortenForm::default()
        }
    };

    let Some(original_url) = from_body
        .url
        .filter(|url| !url.is_empty())
        .or(from_query.url.filter(|url| !url.is_empty()))
    else {
        return Err(AppError::MissingUrl);
    };

    let key = match state.shortener.shorten(&original_url).await {
        Ok(key) => key,
        Err(ShortenerError::InvalidUrl(reason)) => {
            debug!(url = %original_url, reason = %reason, "rejected invalid url");
            return view::render(StatusCode::BAD_REQUEST, &InvalidUrlPage);
        }
        Err(e) => return Err(AppError::Save(e)),
    };

    let short_url = key.to_url(&state.public_base_url);
    info!(key = %key, url = %original_url, "created short url");

    view::render(
        StatusCode::OK,
        &ShortenPage {
            original_url: &original_url,
            short_url: &short_url,
        },
    )
}
