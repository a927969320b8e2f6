//! Budget routes - budget list with derived status

pub mod api;
pub mod page;

pub use api::api_budgets;
pub use page::page_budgets;
