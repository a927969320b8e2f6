//! Built-in sample data served when no data file is configured

use rust_decimal::Decimal;

use crate::types::{BudgetRow, TransactionRow};

fn tx(
    id: u64,
    date: &str,
    description: &str,
    category: &str,
    account: &str,
    cents: i64,
    status: &str,
) -> TransactionRow {
    TransactionRow {
        id,
        date: date.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        account: account.to_string(),
        amount: Decimal::new(cents, 2),
        status: status.to_string(),
    }
}

fn budget(id: u64, name: &str, allocated: i64, spent: i64, color: &str) -> BudgetRow {
    BudgetRow {
        id,
        name: name.to_string(),
        allocated: Decimal::from(allocated),
        spent: Decimal::from(spent),
        color: color.to_string(),
    }
}

/// Sample transactions
pub fn transaction_rows() -> Vec<TransactionRow> {
    vec![
        tx(1, "2024-01-15", "Starbucks Coffee", "Food & Dining", "Chase Checking", -549, "completed"),
        tx(2, "2024-01-15", "Salary Deposit", "Income", "Chase Checking", 500000, "completed"),
        tx(3, "2024-01-14", "Uber Ride", "Transportation", "Chase Checking", -1230, "completed"),
        tx(4, "2024-01-14", "Amazon Purchase", "Shopping", "Credit Card", -8999, "pending"),
        tx(5, "2024-01-13", "Netflix Subscription", "Entertainment", "Credit Card", -1599, "completed"),
        tx(6, "2024-01-13", "Grocery Store", "Food & Dining", "Chase Checking", -6745, "completed"),
        tx(7, "2024-01-12", "Gas Station", "Transportation", "Credit Card", -4520, "completed"),
        tx(8, "2024-01-12", "Freelance Payment", "Income", "Chase Checking", 120000, "completed"),
    ]
}

/// Sample monthly budgets
pub fn budget_rows() -> Vec<BudgetRow> {
    vec![
        budget(1, "Food & Dining", 1000, 850, "#10b981"),
        budget(2, "Transportation", 600, 720, "#ef4444"),
        budget(3, "Entertainment", 300, 245, "#3b82f6"),
        budget(4, "Shopping", 500, 320, "#f59e0b"),
        budget(5, "Bills & Utilities", 800, 780, "#8b5cf6"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_fixture_ids_are_unique() {
        let rows = transaction_rows();
        let ids: HashSet<u64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), rows.len());
    }

    #[test]
    fn test_fixture_amounts() {
        let rows = transaction_rows();
        assert_eq!(rows[0].amount.to_string(), "-5.49");
        assert_eq!(rows[1].amount.to_string(), "5000.00");
        assert_eq!(budget_rows()[1].spent, Decimal::from(720));
    }
}
