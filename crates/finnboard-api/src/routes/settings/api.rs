//! Settings API endpoint - JSON API

use crate::{ApiError, AppState};

/// Active configuration plus where records come from
pub async fn api_settings(
    state: axum::extract::State<AppState>,
) -> Result<axum::Json<serde_json::Value>, ApiError> {
    let mut settings = serde_json::to_value(&state.config)?;
    settings["source"] = serde_json::Value::String(state.book.read().await.source_description());
    Ok(axum::Json(settings))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{fixture_state, get};
    use axum::http::StatusCode;
    use finnboard_config::Config;

    #[tokio::test]
    async fn test_api_settings() {
        let state = fixture_state(Config::default()).await;
        let (status, body) = get(state, "/api/settings").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["server"]["port"], 8081);
        assert_eq!(json["currency"]["symbol_position"], "before");
        assert_eq!(json["source"], "built-in fixture");
    }
}
