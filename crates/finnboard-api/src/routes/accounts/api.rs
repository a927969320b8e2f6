//! Accounts API endpoint - JSON API

use crate::{ApiError, AppState};

/// Per-account balances plus the total (JSON API)
pub async fn api_accounts(
    state: axum::extract::State<AppState>,
) -> Result<axum::Json<serde_json::Value>, ApiError> {
    let book = state.book.read().await;
    Ok(axum::Json(serde_json::to_value(book.accounts_overview())?))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{fixture_state, get};
    use axum::http::StatusCode;
    use finnboard_config::Config;

    #[tokio::test]
    async fn test_api_accounts() {
        let state = fixture_state(Config::default()).await;
        let (status, body) = get(state, "/api/accounts").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        let accounts = json["accounts"].as_array().unwrap();
        assert_eq!(accounts.len(), 3);
        assert_eq!(accounts[0]["account"], "Chase Checking");
        assert_eq!(accounts[0]["balance"], "6114.76");
        assert_eq!(accounts[1]["transaction_count"], 3);
        assert_eq!(accounts[1]["totals"]["total_expenses"], "151.18");
        assert_eq!(json["total_balance"], "5963.58");
    }
}
