//! Transactions API endpoints - JSON API and HTMX partial responses
//!
//! Endpoints:
//! - api_transactions: Filtered, sorted, paged transactions (JSON)
//! - api_transaction_detail: Single transaction (JSON)
//! - htmx_transactions_list: Transaction table (HTML fragment)
//! - export_transactions_csv: Current view as CSV

use crate::{ApiError, AppState};
use axum::extract::Query;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use finnboard_core::{QueryParams, SortKey, SortOrder, SortSpec, TransactionRecord, TransactionStatus, TransactionsResponse};
use finnboard_utils::{escape_html, format_date, format_signed_currency};
use std::collections::HashMap;

pub const CSV_HEADER: [&str; 7] = ["id", "date", "description", "category", "account", "amount", "status"];

/// Parse filter and sort parameters, rejecting unknown values
pub(crate) fn parse_query(params: &HashMap<String, String>) -> Result<QueryParams, ApiError> {
    QueryParams::from_map(params).map_err(|e| {
        log::warn!("Rejected query parameters: {}", e);
        ApiError::bad_request(e)
    })
}

/// Parse `limit` and `offset`
pub(crate) fn parse_paging(params: &HashMap<String, String>, default_limit: usize) -> Result<(usize, usize), ApiError> {
    let number = |key: &str, default: usize| match params.get(key).filter(|s| !s.is_empty()) {
        Some(value) => value
            .parse::<usize>()
            .map_err(|_| ApiError::bad_request(format!("Invalid {}: {}", key, value))),
        None => Ok(default),
    };

    let limit = number("limit", default_limit)?;
    if limit == 0 {
        return Err(ApiError::bad_request("limit must be greater than 0"));
    }
    Ok((limit, number("offset", 0)?))
}

/// Get transactions with filters, sorting and pagination (JSON API)
pub async fn api_transactions(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Result<axum::Json<serde_json::Value>, ApiError> {
    let query = parse_query(&params)?;
    let (limit, offset) = parse_paging(&params, state.config.pagination.records_per_page)?;

    let book = state.book.read().await;
    let response = TransactionsResponse::page(book.query(&query), limit, offset);
    Ok(axum::Json(serde_json::to_value(&response)?))
}

/// Get single transaction detail (JSON API)
pub async fn api_transaction_detail(
    state: axum::extract::State<AppState>,
    path: axum::extract::Path<String>,
) -> Result<axum::Json<serde_json::Value>, ApiError> {
    let id: u64 = path
        .0
        .parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid transaction id: {}", path.0)))?;

    let book = state.book.read().await;
    let record = book.transaction(id)?;
    Ok(axum::Json(serde_json::to_value(record)?))
}

/// URL of the list fragment for a given sort and page, keeping the filters
fn list_url(query: &QueryParams, sort: SortSpec, limit: usize, offset: usize) -> String {
    format!(
        "/transactions/list?q={}&category={}&account={}&sort={}&order={}&limit={}&offset={}",
        urlencoding::encode(&query.search),
        urlencoding::encode(&query.category.to_string()),
        urlencoding::encode(&query.account.to_string()),
        sort.key,
        sort.order,
        limit,
        offset
    )
}

fn sort_header(query: &QueryParams, key: SortKey, label: &str, limit: usize, align: &str) -> String {
    let arrow = if query.sort.key == key {
        match query.sort.order {
            SortOrder::Asc => " ▲",
            SortOrder::Desc => " ▼",
        }
    } else {
        ""
    };
    let next = query.sort.toggle(key);

    format!(
        r#"<th class='px-4 py-2 {}'><a href='#' hx-get='{}' hx-target='#transactions-content' class='hover:text-emerald-600'>{}{}</a></th>"#,
        align,
        escape_html(&list_url(query, next, limit, 0)),
        label,
        arrow
    )
}

fn render_row(tx: &TransactionRecord, currency: &finnboard_config::CurrencyConfig) -> String {
    let amount_class = if tx.is_income() {
        "text-green-600"
    } else if tx.is_expense() {
        "text-red-600"
    } else {
        "text-gray-600"
    };
    let status_class = match tx.status() {
        TransactionStatus::Completed => "bg-green-100 text-green-700",
        TransactionStatus::Pending => "bg-yellow-100 text-yellow-700",
    };

    format!(
        r#"<tr class='border-b hover:bg-gray-50'>
            <td class='px-4 py-2 text-gray-500 whitespace-nowrap'>{}</td>
            <td class='px-4 py-2 font-medium'>{}</td>
            <td class='px-4 py-2'><span class='px-2 py-1 text-xs rounded-full bg-gray-100'>{}</span></td>
            <td class='px-4 py-2 text-gray-500'>{}</td>
            <td class='px-4 py-2'><span class='px-2 py-1 text-xs rounded-full {}'>{}</span></td>
            <td class='px-4 py-2 text-right font-medium {}'>{}</td>
        </tr>"#,
        format_date(tx.date()),
        escape_html(tx.description()),
        escape_html(tx.category().label()),
        tx.account(),
        status_class,
        tx.status(),
        amount_class,
        format_signed_currency(tx.amount(), currency)
    )
}

/// HTMX: Transaction table - Partial page update
pub async fn htmx_transactions_list(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Result<axum::response::Html<String>, ApiError> {
    let query = parse_query(&params)?;
    let (limit, offset) = parse_paging(&params, state.config.pagination.records_per_page)?;

    let book = state.book.read().await;
    let page = TransactionsResponse::page(book.query(&query), limit, offset);
    let currency = &state.config.currency;

    // Hidden sort fields live in the filter form so filter changes keep the sort
    let mut html = format!(
        r#"<input type='hidden' id='sort-field' name='sort' value='{}' hx-swap-oob='true'>
<input type='hidden' id='order-field' name='order' value='{}' hx-swap-oob='true'>"#,
        query.sort.key, query.sort.order
    );

    if page.transactions.is_empty() {
        html.push_str(r#"<div class='text-center py-12 text-gray-500'><p>No transactions found</p></div>"#);
        return Ok(axum::response::Html(html));
    }

    html.push_str(&format!(
        r#"<table class='w-full text-sm'>
        <thead><tr class='border-b text-left text-gray-600'>
            {}{}<th class='px-4 py-2'>Category</th><th class='px-4 py-2'>Account</th><th class='px-4 py-2'>Status</th>{}
        </tr></thead><tbody>"#,
        sort_header(&query, SortKey::Date, "Date", limit, ""),
        sort_header(&query, SortKey::Description, "Description", limit, ""),
        sort_header(&query, SortKey::Amount, "Amount", limit, "text-right")
    ));

    for tx in &page.transactions {
        html.push_str(&render_row(tx, currency));
    }
    html.push_str("</tbody></table>");

    // Past-the-end requests are served the last page
    let offset = page.offset;
    let first = offset + 1;
    let last = offset + page.transactions.len();
    let prev = if offset > 0 {
        format!(
            r#"<button hx-get='{}' hx-target='#transactions-content' class='px-3 py-1 border rounded-lg hover:bg-gray-50'>Previous</button>"#,
            escape_html(&list_url(&query, query.sort, limit, offset.saturating_sub(limit)))
        )
    } else {
        String::new()
    };
    let next = if last < page.total_count {
        format!(
            r#"<button hx-get='{}' hx-target='#transactions-content' class='px-3 py-1 border rounded-lg hover:bg-gray-50'>Next</button>"#,
            escape_html(&list_url(&query, query.sort, limit, last))
        )
    } else {
        String::new()
    };

    html.push_str(&format!(
        r#"<div class='flex items-center justify-between mt-4 text-sm text-gray-600'>
            <span>Showing {}-{} of {}</span>
            <div class='flex gap-2'>{}{}</div>
        </div>"#,
        first, last, page.total_count, prev, next
    ));

    Ok(axum::response::Html(html))
}

/// Write records as CSV
pub fn write_csv<'a>(records: impl IntoIterator<Item = &'a TransactionRecord>) -> Result<Vec<u8>, ApiError> {
    let internal = |e: csv::Error| ApiError::Internal {
        message: format!("CSV write error: {}", e),
    };

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER).map_err(internal)?;
    for tx in records {
        writer
            .write_record([
                tx.id().to_string(),
                tx.date().to_string(),
                tx.description().to_string(),
                tx.category().to_string(),
                tx.account().to_string(),
                tx.amount().to_string(),
                tx.status().to_string(),
            ])
            .map_err(internal)?;
    }

    writer.into_inner().map_err(|e| ApiError::Internal {
        message: format!("CSV flush error: {}", e),
    })
}

/// Export the current view as CSV
pub async fn export_transactions_csv(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let query = parse_query(&params)?;

    let book = state.book.read().await;
    let outcome = book.query(&query);
    let body = write_csv(outcome.view.iter().copied())?;
    log::debug!("Exported {} transactions as CSV", outcome.view.len());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"transactions.csv\""),
        ],
        body,
    )
        .into_response())
}
