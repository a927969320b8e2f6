//! Accounts page rendering

use crate::AppState;
use finnboard_core::AccountSummary;
use finnboard_utils::{escape_html, format_currency};

fn render_account_card(summary: &AccountSummary, currency: &finnboard_config::CurrencyConfig) -> String {
    let balance_class = if summary.balance.is_sign_negative() { "text-red-600" } else { "text-gray-900" };
    format!(
        r#"<div class='bg-white rounded-xl shadow-sm p-6'>
            <h3 class='font-semibold mb-1'>{}</h3>
            <p class='text-sm text-gray-500 mb-3'>{} transactions</p>
            <p class='text-2xl font-bold {}'>{}</p>
            <div class='flex justify-between text-sm mt-3'>
                <span class='text-green-600'>In {}</span>
                <span class='text-red-600'>Out {}</span>
            </div>
        </div>"#,
        escape_html(summary.account.label()),
        summary.transaction_count,
        balance_class,
        format_currency(summary.balance, currency),
        format_currency(summary.totals.total_income, currency),
        format_currency(summary.totals.total_expenses, currency)
    )
}

/// Accounts page - total balance plus one card per account
pub async fn page_accounts(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let book = state.book.read().await;
    let currency = &state.config.currency;
    let overview = book.accounts_overview();

    let cards: String = overview
        .accounts
        .iter()
        .map(|a| render_account_card(a, currency))
        .collect();

    let inner_content = format!(
        r#"<div class='mb-6'><h2 class='text-2xl font-bold'>Accounts</h2></div>
        <div class='bg-gray-50 p-4 rounded-lg border mb-6'><p class='text-sm text-gray-600'>Total Balance</p><p class='text-2xl font-bold'>{}</p></div>
        <div class='grid grid-cols-1 md:grid-cols-3 gap-4'>{}</div>"#,
        format_currency(overview.total_balance, currency),
        cards
    );

    axum::response::Html(crate::page_response(&headers, "Accounts", "/accounts", &inner_content))
}
