use super::AppState;
use crate::domain::account::Account;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RoundUpQuery {
    pub account: Option<String>,
}

/// GET|POST /api/roundup - run a round-up now
pub async fn round_up(
    State(state): State<AppState>,
    Query(query): Query<RoundUpQuery>,
) -> (StatusCode, String) {
    match state.orchestrator.execute(query.account.as_deref()).await {
        Ok(report) => (
            StatusCode::OK,
            format!(
                "Round up completed successfully. Total rounded up: {}",
                report.result
            ),
        ),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            format!("Failed to complete round up: {e}"),
        ),
    }
}

/// GET /api/accounts - the customer's accounts as reported by the bank
pub async fn accounts(
    State(state): State<AppState>,
) -> Result<Json<Vec<Account>>, (StatusCode, String)> {
    state
        .orchestrator
        .accounts()
        .await
        .map(Json)
        .map_err(|e| (StatusCode::BAD_GATEWAY, e.to_string()))
}
