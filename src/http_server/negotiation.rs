//! Content negotiation.
//!
//! The service only produces JSON. Requests whose `Accept` header rules
//! JSON out are refused with 406 before reaching a handler.

use axum::{
    extract::Request,
    http::header::ACCEPT,
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::errors::ApiError;

/// Whether an `Accept` header value admits `application/json`
pub fn accepts_json(accept: &str) -> bool {
    accept.split(',').any(|range| {
        let media = range
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        matches!(
            media.as_str(),
            "" | "*/*" | "application/*" | "application/json"
        )
    })
}

/// Middleware refusing clients that cannot take a JSON body
pub async fn require_json(request: Request, next: Next) -> Response {
    let refused = request
        .headers()
        .get(ACCEPT)
        .map(|value| value.to_str().map(|s| !accepts_json(s)).unwrap_or(true))
        .unwrap_or(false);

    if refused {
        return ApiError::NotAcceptable.into_response();
    }
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_json() {
        assert!(accepts_json("application/json"));
        assert!(accepts_json("*/*"));
        assert!(accepts_json("text/html, application/json;q=0.9"));
        assert!(accepts_json("Application/*"));
        assert!(accepts_json(""));
    }

    #[test]
    fn test_rejects_other_media() {
        assert!(!accepts_json("text/html"));
        assert!(!accepts_json("text/plain, image/png"));
    }
}
