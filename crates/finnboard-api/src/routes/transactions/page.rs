//! Transactions page rendering - Full page endpoint

use crate::AppState;
use axum::extract::Query;
use finnboard_core::types::Wildcard;
use finnboard_core::{AccountName, Category, QueryParams, Selection};
use finnboard_utils::escape_html;
use std::collections::HashMap;

/// Options for a filter drop-down, wildcard first
fn select_options<T>(values: &[T], selected: Selection<T>) -> String
where
    T: Wildcard + std::fmt::Display + PartialEq + Copy,
{
    let mut html = format!(
        "<option value='{}' {}>{}</option>",
        T::WILDCARD,
        if selected == Selection::All { "selected" } else { "" },
        T::WILDCARD
    );
    for value in values {
        let label = escape_html(&value.to_string());
        html.push_str(&format!(
            "<option value='{}' {}>{}</option>",
            label,
            if selected == Selection::Only(*value) { "selected" } else { "" },
            label
        ));
    }
    html
}

/// Transactions page - summary cards, filter controls and the list container
pub async fn page_transactions(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    params: Query<HashMap<String, String>>,
) -> axum::response::Html<String> {
    let book = state.book.read().await;
    let totals = book.totals();

    // Unknown values fall back to defaults; the list endpoint reports them
    let query = QueryParams::from_map(&params).unwrap_or_else(|e| {
        log::warn!("Ignoring invalid transactions page parameters: {}", e);
        QueryParams::default()
    });
    let limit = state.config.pagination.records_per_page;

    let inner_content = format!(
        r#"<div class='flex items-center justify-between mb-4'>
            <h2 class='text-2xl font-bold'>Transactions</h2>
            <div class='flex gap-2'>
                <button onclick='reloadRecords()' class='px-4 py-2 bg-gray-100 text-gray-700 rounded-lg hover:bg-gray-200' title='Reload records'>Reload</button>
                <a href='/transactions/export' onclick='exportCsv(this)' class='px-4 py-2 bg-emerald-600 text-white rounded-lg hover:bg-emerald-700'>Export CSV</a>
            </div>
        </div>
        {}
        <form id='tx-filters' class='flex flex-wrap gap-2 mb-4'
            hx-get='/transactions/list' hx-target='#transactions-content'
            hx-trigger='keyup changed delay:300ms from:input[name=q], change from:select'>
            <input type='text' name='q' value='{}' placeholder='Search transactions...' class='px-4 py-2 border rounded-lg flex-1 min-w-[12rem]'>
            <select name='category' class='px-4 py-2 border rounded-lg'>{}</select>
            <select name='account' class='px-4 py-2 border rounded-lg'>{}</select>
            <input type='hidden' name='limit' value='{}'>
            <input type='hidden' id='sort-field' name='sort' value='{}'>
            <input type='hidden' id='order-field' name='order' value='{}'>
        </form>
        <div id='transactions-content' hx-get='/transactions/list' hx-include='#tx-filters' hx-trigger='load' class='bg-white rounded-xl shadow-sm p-6'>
            <p class='text-gray-500 text-center'>Loading...</p>
        </div>
        <script>
        function exportCsv(link) {{
            const params = new URLSearchParams(new FormData(document.getElementById('tx-filters')));
            params.delete('limit');
            link.href = '/transactions/export?' + params.toString();
        }}
        function reloadRecords() {{
            fetch('/api/reload', {{method: 'POST'}})
                .then(r => r.json())
                .then(data => {{
                    if (data.success) {{
                        window.location.reload();
                    }} else {{
                        alert('Reload failed: ' + data.message);
                    }}
                }})
                .catch(e => alert('Reload failed: ' + e));
        }}
        </script>"#,
        crate::summary_cards(&totals, &state.config.currency),
        escape_html(&query.search),
        select_options(&Category::ALL, query.category),
        select_options(&AccountName::ALL, query.account),
        limit,
        query.sort.key,
        query.sort.order
    );

    axum::response::Html(crate::page_response(&headers, "Transactions", "/transactions", &inner_content))
}
