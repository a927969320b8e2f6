//! Settings page rendering - Full page endpoint

use crate::AppState;
use finnboard_utils::escape_html;

pub async fn page_settings(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let config = &state.config;
    let source = state.book.read().await.source_description();

    let enabled = |flag: bool| if flag { "Enabled" } else { "Disabled" };

    let inner_content = format!(
        r#"<div class='mb-6'><h2 class='text-2xl font-bold'>Settings</h2></div>
        <div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
            <h3 class='text-lg font-semibold mb-4'>Server</h3>
            <div class='grid grid-cols-2 gap-4 mb-4'>
                <div><p class='text-sm text-gray-500'>Host</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>Port</p><p class='font-medium'>{}</p></div>
            </div>
        </div>
        <div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
            <h3 class='text-lg font-semibold mb-4'>Data</h3>
            <div class='grid grid-cols-2 gap-4 mb-4'>
                <div><p class='text-sm text-gray-500'>Data directory</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>Transactions file</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>Active source</p><p class='font-medium'>{}</p></div>
            </div>
        </div>
        <div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
            <h3 class='text-lg font-semibold mb-4'>Display</h3>
            <div class='grid grid-cols-2 gap-4 mb-4'>
                <div><p class='text-sm text-gray-500'>Currency symbol</p><p class='font-medium'>{} ({})</p></div>
                <div><p class='text-sm text-gray-500'>Decimal places</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>Records per page</p><p class='font-medium'>{}</p></div>
            </div>
        </div>
        <div class='bg-white rounded-xl shadow-sm p-6'>
            <h3 class='text-lg font-semibold mb-4'>Assistant</h3>
            <div><p class='text-sm text-gray-500'>Chat</p><p class='font-medium'>{}</p></div>
        </div>"#,
        escape_html(&config.server.host),
        config.server.port,
        escape_html(&config.data.path.display().to_string()),
        escape_html(&config.data.transactions_file),
        escape_html(&source),
        escape_html(&config.currency.symbol),
        config.currency.symbol_position,
        config.currency.decimal_places,
        config.pagination.records_per_page,
        enabled(config.assistant.enable)
    );

    axum::response::Html(crate::page_response(&headers, "Settings", "/settings", &inner_content))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{fixture_state, get};
    use axum::http::StatusCode;
    use finnboard_config::Config;

    #[tokio::test]
    async fn test_settings_page_htmx_partial() {
        let state = fixture_state(Config::default()).await;
        let request = axum::http::Request::builder()
            .uri("/settings")
            .header("hx-request", "true")
            .body(axum::body::Body::empty())
            .unwrap();
        let (status, body) = crate::test_support::send(state.clone(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body.contains("<!DOCTYPE html>"));
        assert!(body.contains("built-in fixture"));

        let (_, body) = get(state, "/settings").await;
        assert!(body.contains("<!DOCTYPE html>"));
        assert!(body.contains("$ (before)"));
    }
}
