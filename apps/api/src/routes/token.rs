use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /api/token
/// Issues a fresh bearer token for a syntactically valid email address.
pub async fn handle_issue_token(
    State(state): State<AppState>,
    payload: Result<Json<TokenRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    let email = payload
        .ok()
        .and_then(|Json(req)| req.email)
        .ok_or_else(|| AppError::Validation("Email is required".to_string()))?;

    if !is_valid_email(&email) {
        return Err(AppError::Validation("Invalid email format".to_string()));
    }

    let token = state.ledger.issue(email);
    Ok(Json(TokenResponse {
        token: token.to_string(),
    }))
}

/// Shape check only: `local@domain.tld` with no whitespace and a single `@`.
/// The domain needs a dot with at least one character on each side.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}
