//! Raw row types as they arrive from a record source
//!
//! Labels are kept as plain strings here; the core crate maps them onto
//! its closed enums and rejects anything it does not recognise.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single transaction row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRow {
    pub id: u64,
    /// Date in YYYY-MM-DD format
    pub date: String,
    pub description: String,
    pub category: String,
    pub account: String,
    /// Signed amount, positive for inflow
    pub amount: Decimal,
    /// "completed" or "pending"
    pub status: String,
}

/// A single budget row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRow {
    pub id: u64,
    /// Category label the budget applies to
    pub name: String,
    pub allocated: Decimal,
    pub spent: Decimal,
    /// Display color, e.g. "#10b981"
    #[serde(default)]
    pub color: String,
}

/// On-disk layout of a JSON data file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataFile {
    #[serde(default)]
    pub transactions: Vec<TransactionRow>,
    #[serde(default)]
    pub budgets: Vec<BudgetRow>,
}
