//! Budgets API endpoint - JSON API

use crate::{ApiError, AppState};

/// Budgets with derived fields plus totals (JSON API)
pub async fn api_budgets(
    state: axum::extract::State<AppState>,
) -> Result<axum::Json<serde_json::Value>, ApiError> {
    let book = state.book.read().await;
    Ok(axum::Json(serde_json::json!({
        "budgets": book.budgets(),
        "summary": book.budget_summary(),
    })))
}
