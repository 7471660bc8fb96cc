use serde::{Deserialize, Serialize};

/// Body (or query string) of a shorten request.
#[derive(Debug, Default, Deserialize)]
pub struct ShortenForm {
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
