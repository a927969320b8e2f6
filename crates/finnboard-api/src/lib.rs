//! HTTP API server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::transactions: Transaction list, filters, sorting, export
//! - routes::accounts: Per-account balances
//! - routes::budgets: Budget cards and totals
//! - routes::assistant: Canned-response chat endpoint
//! - routes::settings: Configuration display

pub mod error;
pub mod routes;

use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use finnboard_config::Config;
use finnboard_core::TransactionBook;
use finnboard_utils::{escape_html, format_currency, format_percentage};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub book: Arc<RwLock<TransactionBook>>,
    pub config: Config,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::accounts::{api_accounts, page_accounts};
    use routes::assistant::api_assistant;
    use routes::budgets::{api_budgets, page_budgets};
    use routes::settings::{api_settings, page_settings};
    use routes::transactions::{
        api_transaction_detail, api_transactions, export_transactions_csv, htmx_transactions_list,
        page_transactions,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST]);

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/transactions", get(api_transactions))
        .route("/api/transactions/:id", get(api_transaction_detail))
        .route("/api/accounts", get(api_accounts))
        .route("/api/budgets", get(api_budgets))
        .route("/api/summary", get(api_summary))
        .route("/api/assistant", post(api_assistant))
        .route("/api/settings", get(api_settings))
        .route("/api/reload", post(api_reload))
        // HTMX page routes
        .route("/", get(index_page))
        .route("/transactions", get(page_transactions))
        .route("/accounts", get(page_accounts))
        .route("/budgets", get(page_budgets))
        .route("/settings", get(page_settings))
        // HTMX partial routes
        .route("/transactions/list", get(htmx_transactions_list))
        .route("/transactions/export", get(export_transactions_csv))
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Dashboard summary (JSON API)
async fn api_summary(
    state: axum::extract::State<AppState>,
) -> Result<axum::Json<serde_json::Value>, ApiError> {
    let book = state.book.read().await;
    Ok(axum::Json(serde_json::to_value(book.summary())?))
}

/// Reload records from the configured source
async fn api_reload(
    state: axum::extract::State<AppState>,
) -> Result<axum::Json<serde_json::Value>, ApiError> {
    let mut book = state.book.write().await;
    match book.reload().await {
        Ok(count) => {
            log::info!("Reloaded {} transactions", count);
            Ok(axum::Json(serde_json::json!({
                "success": true,
                "count": count,
            })))
        }
        Err(e) => {
            log::warn!("Reload failed, keeping previous records: {}", e);
            Err(e.into())
        }
    }
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Finnboard</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        escape_html(title),
        content
    )
}

/// Navigation sidebar
pub fn nav_sidebar(current_path: &str) -> String {
    let links = [
        ("/", "Dashboard", "📊"),
        ("/transactions", "Transactions", "📋"),
        ("/accounts", "Accounts", "🏦"),
        ("/budgets", "Budgets", "🎯"),
        ("/settings", "Settings", "⚙️"),
    ];

    let mut nav = String::from("<div class='bg-white border-r h-screen flex flex-col'><div class='p-4 border-b'><h1 class='text-xl font-bold text-emerald-600'>Finnboard</h1></div><ul class='flex-1 py-2 space-y-1 px-2'>");

    for (path, label, icon) in &links {
        let is_active = if *path == "/" {
            current_path == "/"
        } else {
            current_path.starts_with(path)
        };
        let active_class = if is_active { "bg-emerald-50 text-emerald-600" } else { "text-gray-600 hover:bg-gray-50" };
        nav.push_str(&format!(
            r#"<li><a href='{}' class='flex items-center gap-2 px-3 py-2 rounded-lg {}'>{}<span>{}</span></a></li>"#,
            path, active_class, icon, label
        ));
    }
    nav.push_str("</ul></div>");
    nav
}

fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for a full page, or return it bare for HTMX requests
pub fn page_response(headers: &axum::http::HeaderMap, title: &str, current_path: &str, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        format!("<main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>", inner_content)
    } else {
        base_html(title, &format!(r#"<div class='flex flex-col h-screen'>
    <div class='flex flex-1 overflow-hidden'>
        <aside class='w-64 flex-shrink-0'>{}</aside>
        <main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>
    </div>
</div>"#,
            nav_sidebar(current_path), inner_content))
    }
}

/// Summary card row shared by the dashboard and transactions pages
pub fn summary_cards(totals: &finnboard_core::Totals, currency: &finnboard_config::CurrencyConfig) -> String {
    let net_class = if totals.net_flow.is_sign_negative() { "text-red-700" } else { "text-blue-700" };
    format!(
        r#"<div class='grid grid-cols-1 md:grid-cols-3 gap-4 mb-6'>
            <div class='bg-green-50 p-4 rounded-lg border border-green-200'><p class='text-sm text-green-600'>Total Income</p><p class='text-2xl font-bold text-green-700'>{}</p></div>
            <div class='bg-red-50 p-4 rounded-lg border border-red-200'><p class='text-sm text-red-600'>Total Expenses</p><p class='text-2xl font-bold text-red-700'>{}</p></div>
            <div class='bg-blue-50 p-4 rounded-lg border border-blue-200'><p class='text-sm text-blue-600'>Net Cash Flow</p><p class='text-2xl font-bold {}'>{}</p></div>
        </div>"#,
        format_currency(totals.total_income, currency),
        format_currency(totals.total_expenses, currency),
        net_class,
        format_currency(totals.net_flow, currency)
    )
}

/// Dashboard page
async fn index_page(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let book = state.book.read().await;
    let summary = book.summary();
    let currency = &state.config.currency;

    let savings_rate = summary
        .savings_rate
        .map(format_percentage)
        .unwrap_or_else(|| "-".to_string());

    let assistant = if state.config.assistant.enable {
        format!(
            r#"<div class='bg-white rounded-xl shadow-sm p-6'>
                <h3 class='text-lg font-semibold mb-4'>Assistant</h3>
                <div id='chat-log' class='space-y-2 mb-4 text-sm'><p class='bg-gray-50 p-3 rounded-lg'>{}</p></div>
                <form onsubmit='sendChat(event)' class='flex gap-2'>
                    <input id='chat-input' type='text' placeholder='Ask about your finances...' class='flex-1 px-4 py-2 border rounded-lg'>
                    <button class='px-4 py-2 bg-emerald-600 text-white rounded-lg'>Send</button>
                </form>
            </div>
            <script>
            function sendChat(e) {{
                e.preventDefault();
                const input = document.getElementById('chat-input');
                const message = input.value;
                if (!message.trim()) return;
                const log = document.getElementById('chat-log');
                log.insertAdjacentHTML('beforeend', "<p class='bg-emerald-50 p-3 rounded-lg text-right'></p>");
                log.lastElementChild.textContent = message;
                input.value = '';
                fetch('/api/assistant', {{method: 'POST', headers: {{'Content-Type': 'application/json'}}, body: JSON.stringify({{message}})}})
                    .then(r => r.json())
                    .then(data => {{
                        log.insertAdjacentHTML('beforeend', "<p class='bg-gray-50 p-3 rounded-lg'></p>");
                        log.lastElementChild.textContent = data.reply || data.message;
                    }});
            }}
            </script>"#,
            escape_html(&state.config.assistant.greeting)
        )
    } else {
        String::new()
    };

    let spending = if summary.spending.is_empty() {
        "<p class='text-sm text-gray-500'>No spending yet</p>".to_string()
    } else {
        summary
            .spending
            .iter()
            .map(|c| {
                format!(
                    r#"<div class='flex items-center justify-between text-sm'><span class='text-gray-600'>{}</span><span>{} <span class='text-gray-500'>({})</span></span></div>"#,
                    escape_html(c.category.label()),
                    format_currency(c.amount, currency),
                    format_percentage(c.percentage)
                )
            })
            .collect()
    };

    let inner_content = format!(
        r#"<div class='mb-6'><h2 class='text-2xl font-bold'>Dashboard</h2></div>
        {}
        <div class='grid grid-cols-1 lg:grid-cols-2 gap-6 mb-6'>
            <div class='bg-white rounded-xl shadow-sm p-6'>
                <h3 class='text-lg font-semibold mb-4'>This Month</h3>
                <div class='grid grid-cols-2 gap-4'>
                    <div class='text-center p-4 bg-gray-50 rounded-lg'><p class='text-sm text-gray-600'>Transactions</p><p class='text-xl font-bold'>{}</p></div>
                    <div class='text-center p-4 bg-gray-50 rounded-lg'><p class='text-sm text-gray-600'>Savings Rate</p><p class='text-xl font-bold text-emerald-600'>{}</p></div>
                    <div class='text-center p-4 bg-gray-50 rounded-lg'><p class='text-sm text-gray-600'>Budgeted</p><p class='text-xl font-bold'>{}</p></div>
                    <div class='text-center p-4 bg-gray-50 rounded-lg'><p class='text-sm text-gray-600'>Spent</p><p class='text-xl font-bold'>{}</p></div>
                </div>
                <a href='/accounts' class='block mt-4 text-sm text-emerald-600'>Total balance {}</a>
            </div>
            <div class='bg-white rounded-xl shadow-sm p-6'>
                <h3 class='text-lg font-semibold mb-4'>Spending by Category</h3>
                <div class='space-y-2'>{}</div>
            </div>
            {}
        </div>"#,
        summary_cards(&summary.totals, currency),
        summary.transaction_count,
        savings_rate,
        format_currency(summary.budgets.total_allocated, currency),
        format_currency(summary.budgets.total_spent, currency),
        format_currency(summary.total_balance, currency),
        spending,
        assistant
    );

    axum::response::Html(page_response(&headers, "Dashboard", "/", &inner_content))
}

/// Start the HTTP server
///
/// Binds to the configured address and serves until the listener fails.
pub async fn start_server(config: Config, book: Arc<RwLock<TransactionBook>>) -> std::io::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState { book, config };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting Finnboard server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - / (Dashboard)");
    log::info!("  - /transactions (Transaction list)");
    log::info!("  - /accounts (Account balances)");
    log::info!("  - /budgets (Budgets)");
    log::info!("  - /settings (Configuration)");
    log::info!("  - /api/* (JSON API endpoints)");

    axum::serve(listener, router).await?;
    log::info!("Server stopped");
    Ok(())
}
