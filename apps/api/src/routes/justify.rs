use axum::{
    extract::{rejection::StringRejection, State},
    http::{header::CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::IntoResponse,
};
use tracing::{debug, warn};

use crate::auth::Authenticated;
use crate::errors::AppError;
use crate::layout::{count_words, justify};
use crate::quota::Reservation;
use crate::state::AppState;

const X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
const X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
const X_RATELIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");

/// POST /api/justify
/// Charges the body's word count against the caller's daily quota, then returns the body
/// justified to the configured line width as `text/plain`.
pub async fn handle_justify(
    State(state): State<AppState>,
    auth: Authenticated,
    headers: HeaderMap,
    body: Result<String, StringRejection>,
) -> Result<impl IntoResponse, AppError> {
    let text = match body {
        Ok(text) => text,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return Err(AppError::PayloadTooLarge)
        }
        Err(_) => {
            return Err(AppError::Validation(
                "Request body must be valid UTF-8 text".to_string(),
            ))
        }
    };

    if !is_plain_text(&headers) || text.is_empty() {
        return Err(AppError::Validation(
            "Request body must be non-empty text/plain".to_string(),
        ));
    }

    let words = count_words(&text) as u64;
    if words == 0 {
        return Err(AppError::Validation(
            "Request body contains no words".to_string(),
        ));
    }

    let reservation = state.ledger.reserve(&auth.token, words);
    if !reservation.admitted {
        warn!(
            token = %auth.token.short(),
            requested = words,
            remaining = reservation.remaining,
            "Daily word limit exceeded"
        );
        return Err(AppError::QuotaExceeded {
            reservation,
            requested: words,
        });
    }

    let width = state.config.line_width;
    debug!(token = %auth.token.short(), words, width, "Justifying text");

    // CPU-bound on large bodies; keep it off the async workers.
    let justified = tokio::task::spawn_blocking(move || justify(&text, width))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in justify: {e}")))?;

    Ok((rate_limit_headers(&reservation), justified))
}

/// `X-RateLimit-*` headers describing the caller's budget after a reservation.
/// Sent on both admitted and rejected requests.
pub fn rate_limit_headers(reservation: &Reservation) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(X_RATELIMIT_LIMIT, HeaderValue::from(reservation.limit));
    headers.insert(X_RATELIMIT_REMAINING, HeaderValue::from(reservation.remaining));
    if let Ok(reset) = HeaderValue::from_str(&reservation.resets_at.to_rfc3339()) {
        headers.insert(X_RATELIMIT_RESET, reset);
    }
    headers
}

fn is_plain_text(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("text/plain"))
}
