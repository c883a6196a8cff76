use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};

use crate::errors::AppError;
use crate::quota::{Token, TokenRecord};
use crate::state::AppState;

/// A request carrying a valid `Authorization: Bearer <token>` header.
///
/// Rejects with 401 when the header is missing, malformed, or names a token the ledger
/// never issued.
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub token: Token,
    pub record: TokenRecord,
}

#[async_trait]
impl FromRequestParts<AppState> for Authenticated {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AppError::Unauthorized("Authorization header is required"))?;

        let raw = header
            .to_str()
            .ok()
            .and_then(parse_bearer)
            .ok_or(AppError::Unauthorized(
                "Invalid authorization format. Use: Bearer <token>",
            ))?;

        Token::parse(raw)
            .and_then(|token| state.ledger.lookup(&token).map(|record| (token, record)))
            .map(|(token, record)| Authenticated { token, record })
            .ok_or(AppError::Unauthorized("Invalid or expired token"))
    }
}

/// Extracts `<token>` from exactly `Bearer <token>`: one space, no extra parts.
fn parse_bearer(value: &str) -> Option<&str> {
    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Some(token),
        _ => None,
    }
}
