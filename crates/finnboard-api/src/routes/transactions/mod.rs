//! Transaction routes - list, search, filters, sorting, export
//!
//! Structure:
//! - api.rs: JSON API, HTMX list fragment and CSV export
//! - page.rs: Full page rendering

pub mod api;
pub mod page;

pub use api::{api_transaction_detail, api_transactions, export_transactions_csv, htmx_transactions_list};
pub use page::page_transactions;
