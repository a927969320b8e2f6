//! Account routes - per-account balances derived from transactions

pub mod api;
pub mod page;

pub use api::api_accounts;
pub use page::page_accounts;
