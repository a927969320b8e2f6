//! Core data models

use chrono::NaiveDate;
use finnboard_source::{BudgetRow, TransactionRow};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::error::CoreError;
use crate::types::{AccountName, Category, TransactionStatus};

/// A single transaction. Fields are fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRecord {
    id: u64,
    date: NaiveDate,
    description: String,
    category: Category,
    account: AccountName,
    amount: Decimal,
    status: TransactionStatus,
}

impl TransactionRecord {
    pub fn new(
        id: u64,
        date: NaiveDate,
        description: impl Into<String>,
        category: Category,
        account: AccountName,
        amount: Decimal,
        status: TransactionStatus,
    ) -> Self {
        Self {
            id,
            date,
            description: description.into(),
            category,
            account,
            amount,
            status,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn account(&self) -> AccountName {
        self.account
    }

    /// Signed amount, positive for inflow
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    /// Positive amounts are income
    pub fn is_income(&self) -> bool {
        self.amount.is_sign_positive() && !self.amount.is_zero()
    }

    /// Negative amounts are expenses
    pub fn is_expense(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }
}

impl TryFrom<TransactionRow> for TransactionRecord {
    type Error = CoreError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        let invalid = |message: String| CoreError::InvalidFormat {
            message: format!("transaction {}: {}", row.id, message),
        };

        let date = NaiveDate::parse_from_str(row.date.trim(), "%Y-%m-%d")
            .map_err(|e| invalid(format!("invalid date '{}': {}", row.date, e)))?;
        let category: Category = row.category.parse().map_err(invalid)?;
        let account: AccountName = row.account.parse().map_err(invalid)?;
        let status: TransactionStatus = row.status.parse().map_err(invalid)?;

        Ok(Self {
            id: row.id,
            date,
            description: row.description,
            category,
            account,
            amount: row.amount,
            status,
        })
    }
}

/// How a budget is tracking against its allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetStatus {
    /// Spent more than allocated
    OverBudget,
    /// At or above 90% of the allocation
    Warning,
    /// At or above 75% of the allocation
    OnTrack,
    /// Below 75% of the allocation
    UnderBudget,
}

impl BudgetStatus {
    /// Classify by spending and whole-number percentage used
    pub fn classify(allocated: Decimal, spent: Decimal, percentage: Decimal) -> Self {
        if spent > allocated {
            BudgetStatus::OverBudget
        } else if percentage >= Decimal::from(90) {
            BudgetStatus::Warning
        } else if percentage >= Decimal::from(75) {
            BudgetStatus::OnTrack
        } else {
            BudgetStatus::UnderBudget
        }
    }
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BudgetStatus::OverBudget => write!(f, "over-budget"),
            BudgetStatus::Warning => write!(f, "warning"),
            BudgetStatus::OnTrack => write!(f, "on-track"),
            BudgetStatus::UnderBudget => write!(f, "under-budget"),
        }
    }
}

/// A monthly spending limit for one category
///
/// `remaining`, `percentage` and `status` are derived once at creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Budget {
    id: u64,
    category: Category,
    allocated: Decimal,
    spent: Decimal,
    remaining: Decimal,
    percentage: Decimal,
    status: BudgetStatus,
    color: String,
}

impl Budget {
    pub fn new(id: u64, category: Category, allocated: Decimal, spent: Decimal, color: impl Into<String>) -> Self {
        let remaining = allocated - spent;
        let percentage = if allocated.is_zero() {
            Decimal::ZERO
        } else {
            (spent / allocated * Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        };
        let status = BudgetStatus::classify(allocated, spent, percentage);

        Self {
            id,
            category,
            allocated,
            spent,
            remaining,
            percentage,
            status,
            color: color.into(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn allocated(&self) -> Decimal {
        self.allocated
    }

    pub fn spent(&self) -> Decimal {
        self.spent
    }

    /// Allocation minus spending; negative when over budget
    pub fn remaining(&self) -> Decimal {
        self.remaining
    }

    /// Whole-number share of the allocation already spent
    pub fn percentage(&self) -> Decimal {
        self.percentage
    }

    pub fn status(&self) -> BudgetStatus {
        self.status
    }

    pub fn color(&self) -> &str {
        &self.color
    }
}

impl TryFrom<BudgetRow> for Budget {
    type Error = CoreError;

    fn try_from(row: BudgetRow) -> Result<Self, Self::Error> {
        let category: Category = row.name.parse().map_err(|e| CoreError::InvalidFormat {
            message: format!("budget {}: {}", row.id, e),
        })?;

        if row.allocated.is_sign_negative() || row.spent.is_sign_negative() {
            return Err(CoreError::InvalidFormat {
                message: format!("budget {}: allocated and spent must not be negative", row.id),
            });
        }

        Ok(Budget::new(row.id, category, row.allocated, row.spent, row.color))
    }
}
