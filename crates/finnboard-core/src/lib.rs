//! Core transaction processing and business logic

pub mod assistant;
pub mod error;
pub mod models;
pub mod query;
pub mod types;

use finnboard_source::{DataFile, SourceRef};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashSet;

pub use error::{CoreError, CoreResult, ErrorSeverity};
pub use models::{Budget, BudgetStatus, TransactionRecord};
pub use query::{
    AccountSummary, AccountsOverview, CategorySpending, QueryOutcome, QueryParams, SortKey, SortOrder, SortSpec,
    Totals,
};
pub use types::{AccountName, Category, Selection, TransactionStatus};

/// In-memory transaction and budget store fed by a record source
pub struct TransactionBook {
    source: SourceRef,
    records: Vec<TransactionRecord>,
    budgets: Vec<Budget>,
    loaded: bool,
}

impl TransactionBook {
    /// Create an empty book over a record source
    pub fn new(source: SourceRef) -> Self {
        Self {
            source,
            records: Vec::new(),
            budgets: Vec::new(),
            loaded: false,
        }
    }

    /// Load records from the source. On failure the previous contents stay.
    pub async fn load(&mut self) -> CoreResult<usize> {
        let DataFile {
            transactions: rows,
            budgets: budget_rows,
        } = self.source.load_all().await?;

        let mut seen = HashSet::new();
        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            if !seen.insert(row.id) {
                return Err(CoreError::InvalidFormat {
                    message: format!("duplicate transaction id {}", row.id),
                });
            }
            records.push(TransactionRecord::try_from(row)?);
        }

        let budgets = budget_rows
            .into_iter()
            .map(Budget::try_from)
            .collect::<CoreResult<Vec<_>>>()?;

        log::info!(
            "Loaded {} transactions and {} budgets from {}",
            records.len(),
            budgets.len(),
            self.source.describe()
        );

        self.records = records;
        self.budgets = budgets;
        self.loaded = true;

        Ok(self.records.len())
    }

    /// Reload from the same source
    pub async fn reload(&mut self) -> CoreResult<usize> {
        if !self.loaded {
            log::debug!("Reload requested before first load");
        }
        self.load().await
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    /// Every record, in source order
    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    /// Look up a record by id
    pub fn transaction(&self, id: u64) -> CoreResult<&TransactionRecord> {
        if !self.loaded {
            return Err(CoreError::NotLoaded);
        }
        self.records
            .iter()
            .find(|r| r.id() == id)
            .ok_or(CoreError::TransactionNotFound { id })
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    /// Run the query engine over the loaded records
    pub fn query(&self, params: &QueryParams) -> QueryOutcome<'_> {
        query::run(&self.records, params)
    }

    /// Totals over every loaded record
    pub fn totals(&self) -> Totals {
        query::aggregate(&self.records)
    }

    /// Expenses per category over every loaded record
    pub fn spending_by_category(&self) -> Vec<CategorySpending> {
        query::spending_by_category(&self.records)
    }

    pub fn accounts_overview(&self) -> AccountsOverview {
        query::accounts_overview(&self.records)
    }

    pub fn budget_summary(&self) -> BudgetSummary {
        BudgetSummary::from_budgets(&self.budgets)
    }

    /// Dashboard numbers
    pub fn summary(&self) -> DashboardSummary {
        let totals = self.totals();
        DashboardSummary {
            transaction_count: self.records.len(),
            savings_rate: totals.savings_rate(),
            totals,
            budgets: self.budget_summary(),
            spending: self.spending_by_category(),
            total_balance: self.accounts_overview().total_balance,
        }
    }
}

/// Totals across all budgets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct BudgetSummary {
    pub total_allocated: Decimal,
    pub total_spent: Decimal,
    pub total_remaining: Decimal,
}

impl BudgetSummary {
    pub fn from_budgets(budgets: &[Budget]) -> Self {
        let total_allocated: Decimal = budgets.iter().map(|b| b.allocated()).sum();
        let total_spent: Decimal = budgets.iter().map(|b| b.spent()).sum();
        Self {
            total_allocated,
            total_spent,
            total_remaining: total_allocated - total_spent,
        }
    }
}

/// Dashboard summary response
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub transaction_count: usize,
    pub totals: Totals,
    /// Percent of income kept; absent when there is no income
    pub savings_rate: Option<Decimal>,
    pub budgets: BudgetSummary,
    /// Spending breakdown, largest category first
    pub spending: Vec<CategorySpending>,
    /// Balance across all accounts
    pub total_balance: Decimal,
}

/// Paged transactions response for the JSON API
#[derive(Debug, Serialize)]
pub struct TransactionsResponse<'a> {
    pub transactions: Vec<&'a TransactionRecord>,
    pub total_count: usize,
    pub page: usize,
    pub page_size: usize,
    /// Offset actually served; past-the-end requests land on the last page
    pub offset: usize,
    pub totals: Totals,
}

impl<'a> TransactionsResponse<'a> {
    /// Cut one page out of a query outcome
    pub fn page(outcome: QueryOutcome<'a>, limit: usize, offset: usize) -> Self {
        let limit = limit.max(1);
        let total_count = outcome.view.len();
        let offset = if offset >= total_count {
            total_count.saturating_sub(1) / limit * limit
        } else {
            offset
        };
        let transactions = outcome.view.into_iter().skip(offset).take(limit).collect();

        Self {
            transactions,
            total_count,
            page: (offset / limit).saturating_add(1),
            page_size: limit,
            offset,
            totals: outcome.totals,
        }
    }
}
