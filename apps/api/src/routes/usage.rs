use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::auth::Authenticated;
use crate::quota::Usage;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageResponse {
    pub owner: String,
    pub issued_at: DateTime<Utc>,
    #[serde(flatten)]
    pub usage: Usage,
}

/// GET /api/usage
/// Reports the caller's word usage for the current UTC day. Does not consume quota.
pub async fn handle_usage(
    State(state): State<AppState>,
    auth: Authenticated,
) -> Json<UsageResponse> {
    Json(UsageResponse {
        owner: auth.record.owner,
        issued_at: auth.record.created_at,
        usage: state.ledger.usage(&auth.token),
    })
}
