//! Budgets page rendering

use crate::AppState;
use finnboard_core::{Budget, BudgetStatus};
use finnboard_utils::{escape_html, format_currency};
use rust_decimal::Decimal;

fn status_badge(status: BudgetStatus) -> (&'static str, &'static str) {
    match status {
        BudgetStatus::OverBudget => ("Over Budget", "bg-red-100 text-red-700"),
        BudgetStatus::Warning => ("Warning", "bg-yellow-100 text-yellow-700"),
        BudgetStatus::OnTrack => ("On Track", "bg-blue-100 text-blue-700"),
        BudgetStatus::UnderBudget => ("Under Budget", "bg-green-100 text-green-700"),
    }
}

fn render_budget_card(budget: &Budget, currency: &finnboard_config::CurrencyConfig) -> String {
    let (label, badge_class) = status_badge(budget.status());
    // The bar stops at full width; the label shows the real percentage
    let width = budget.percentage().min(Decimal::ONE_HUNDRED);
    let remaining_class = if budget.remaining().is_sign_negative() { "text-red-600" } else { "text-gray-600" };

    format!(
        r#"<div class='bg-white rounded-xl shadow-sm p-6'>
            <div class='flex items-center justify-between mb-2'>
                <h3 class='font-semibold'>{}</h3>
                <span class='px-2 py-1 text-xs rounded-full {}'>{}</span>
            </div>
            <p class='text-sm text-gray-500 mb-2'>{} of {}</p>
            <div class='w-full bg-gray-100 rounded-full h-2 mb-2'>
                <div class='h-2 rounded-full' style='width: {}%; background-color: {}'></div>
            </div>
            <div class='flex justify-between text-sm'>
                <span>{}%</span>
                <span class='{}'>{} remaining</span>
            </div>
        </div>"#,
        escape_html(budget.category().label()),
        badge_class,
        label,
        format_currency(budget.spent(), currency),
        format_currency(budget.allocated(), currency),
        width,
        escape_html(budget.color()),
        budget.percentage(),
        remaining_class,
        format_currency(budget.remaining(), currency)
    )
}

/// Budgets page - one card per budget plus totals
pub async fn page_budgets(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let book = state.book.read().await;
    let currency = &state.config.currency;
    let summary = book.budget_summary();

    let cards: Vec<String> = book
        .budgets()
        .iter()
        .map(|b| render_budget_card(b, currency))
        .collect();

    let cards = if cards.is_empty() {
        r#"<div class='text-center py-12 text-gray-500'><p>No budgets configured</p></div>"#.to_string()
    } else {
        format!("<div class='grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4'>{}</div>", cards.join(""))
    };

    let inner_content = format!(
        r#"<div class='mb-6'><h2 class='text-2xl font-bold'>Budgets</h2></div>
        <div class='grid grid-cols-1 md:grid-cols-3 gap-4 mb-6'>
            <div class='bg-gray-50 p-4 rounded-lg border'><p class='text-sm text-gray-600'>Total Budget</p><p class='text-2xl font-bold'>{}</p></div>
            <div class='bg-gray-50 p-4 rounded-lg border'><p class='text-sm text-gray-600'>Total Spent</p><p class='text-2xl font-bold'>{}</p></div>
            <div class='bg-gray-50 p-4 rounded-lg border'><p class='text-sm text-gray-600'>Remaining</p><p class='text-2xl font-bold'>{}</p></div>
        </div>
        {}"#,
        format_currency(summary.total_allocated, currency),
        format_currency(summary.total_spent, currency),
        format_currency(summary.total_remaining, currency),
        cards
    );

    axum::response::Html(crate::page_response(&headers, "Budgets", "/budgets", &inner_content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fixture_state, get};
    use axum::http::StatusCode;
    use finnboard_config::{Config, CurrencyConfig};
    use finnboard_core::Category;

    #[test]
    fn test_card_caps_bar_width() {
        let budget = Budget::new(2, Category::Transportation, Decimal::from(600), Decimal::from(720), "#ef4444");
        let html = render_budget_card(&budget, &CurrencyConfig::default());
        assert!(html.contains("width: 100%"));
        assert!(html.contains("<span>120%</span>"));
        assert!(html.contains("-$120.00 remaining"));
        assert!(html.contains("Over Budget"));
    }

    #[tokio::test]
    async fn test_budgets_page() {
        let state = fixture_state(Config::default()).await;
        let (status, body) = get(state, "/budgets").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("$3,200.00"));
        assert!(body.contains("$285.00"));
        assert!(body.contains("Bills &amp; Utilities"));
        assert_eq!(body.matches("rounded-full h-2 mb-2").count(), 5);
    }
}
