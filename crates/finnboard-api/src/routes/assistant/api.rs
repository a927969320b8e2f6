//! Assistant API endpoint - JSON API

use crate::{ApiError, AppState};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AssistantRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct AssistantResponse {
    pub reply: &'static str,
}

/// Reply to a chat message
pub async fn api_assistant(
    state: axum::extract::State<AppState>,
    axum::Json(request): axum::Json<AssistantRequest>,
) -> Result<axum::Json<AssistantResponse>, ApiError> {
    if !state.config.assistant.enable {
        return Err(ApiError::NotFound {
            resource: "assistant".to_string(),
        });
    }
    if request.message.trim().is_empty() {
        return Err(ApiError::bad_request("message must not be empty"));
    }

    Ok(axum::Json(AssistantResponse {
        reply: finnboard_core::assistant::reply(&request.message),
    }))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{fixture_state, send};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use finnboard_config::Config;
    use finnboard_core::assistant::RESPONSES;

    fn chat(message: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/assistant")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::json!({ "message": message }).to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_assistant_reply() {
        let state = fixture_state(Config::default()).await;
        let (status, body) = send(state, chat("Am I over budget?")).await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["reply"], RESPONSES[4]);
    }

    #[tokio::test]
    async fn test_assistant_rejects_blank_message() {
        let state = fixture_state(Config::default()).await;
        let (status, _) = send(state, chat("   ")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_assistant_disabled() {
        let mut config = Config::default();
        config.assistant.enable = false;
        let state = fixture_state(config).await;
        let (status, _) = send(state, chat("hello")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
