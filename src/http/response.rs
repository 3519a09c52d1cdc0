//! Response construction.
//!
//! # Responsibilities
//! - Build redirect and gateway-error responses
//! - Define the JSON shape the content API returns

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::content::{ContentItem, Language};

/// Build a 301 response pointing clients at the canonical URL.
///
/// An unrepresentable location (cannot happen for targets built from a valid
/// request path) degrades to 400 rather than panicking.
pub fn permanent_redirect(location: &str) -> Response {
    let mut response = Response::new(Body::empty());
    match HeaderValue::from_str(location) {
        Ok(value) => {
            *response.status_mut() = StatusCode::MOVED_PERMANENTLY;
            response.headers_mut().insert(header::LOCATION, value);
        }
        Err(_) => {
            *response.status_mut() = StatusCode::BAD_REQUEST;
        }
    }
    response
}

/// 502 for a failed upstream forward.
pub fn bad_gateway() -> Response {
    (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
}

/// JSON 404 for API lookups.
pub fn not_found(message: &'static str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": message })),
    )
        .into_response()
}

/// Post shape returned by the content API.
#[derive(Debug, Serialize)]
pub struct PostSummary {
    pub id: u64,
    pub slug: String,
    pub title: String,
    pub language: Language,
    pub date: DateTime<Utc>,
}

impl From<&ContentItem> for PostSummary {
    fn from(item: &ContentItem) -> Self {
        Self {
            id: item.id,
            slug: item.slug.clone(),
            title: item.title.clone(),
            language: item.language,
            date: item.date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permanent_redirect_sets_location() {
        let response = permanent_redirect("/uk/som");
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/uk/som"
        );
    }

    #[test]
    fn test_invalid_location_degrades() {
        let response = permanent_redirect("/uk/\u{0000}");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
