//! Closed label sets used by transaction records and filters

use serde::{Deserialize, Serialize};

/// Values that have an "everything" entry in filter drop-downs
pub trait Wildcard {
    /// Label of the wildcard entry, e.g. "All Categories"
    const WILDCARD: &'static str;
}

/// Transaction category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Food & Dining")]
    FoodAndDining,
    #[serde(rename = "Transportation")]
    Transportation,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Income")]
    Income,
    #[serde(rename = "Bills & Utilities")]
    BillsAndUtilities,
    #[serde(rename = "Healthcare")]
    Healthcare,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    /// Every category, in drop-down order
    pub const ALL: [Category; 8] = [
        Category::FoodAndDining,
        Category::Transportation,
        Category::Shopping,
        Category::Entertainment,
        Category::Income,
        Category::BillsAndUtilities,
        Category::Healthcare,
        Category::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::FoodAndDining => "Food & Dining",
            Category::Transportation => "Transportation",
            Category::Shopping => "Shopping",
            Category::Entertainment => "Entertainment",
            Category::Income => "Income",
            Category::BillsAndUtilities => "Bills & Utilities",
            Category::Healthcare => "Healthcare",
            Category::Other => "Other",
        }
    }
}

impl Wildcard for Category {
    const WILDCARD: &'static str = "All Categories";
}

impl std::str::FromStr for Category {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("Invalid category: {}", s))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Account a transaction was booked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountName {
    #[serde(rename = "Chase Checking")]
    ChaseChecking,
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "Savings Account")]
    SavingsAccount,
}

impl AccountName {
    /// Every account, in drop-down order
    pub const ALL: [AccountName; 3] = [
        AccountName::ChaseChecking,
        AccountName::CreditCard,
        AccountName::SavingsAccount,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AccountName::ChaseChecking => "Chase Checking",
            AccountName::CreditCard => "Credit Card",
            AccountName::SavingsAccount => "Savings Account",
        }
    }
}

impl Wildcard for AccountName {
    const WILDCARD: &'static str = "All Accounts";
}

impl std::str::FromStr for AccountName {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AccountName::ALL
            .iter()
            .find(|a| a.label().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("Invalid account: {}", s))
    }
}

impl std::fmt::Display for AccountName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Settlement status of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Completed,
    Pending,
}

impl std::str::FromStr for TransactionStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "completed" => Ok(TransactionStatus::Completed),
            "pending" => Ok(TransactionStatus::Pending),
            _ => Err(format!("Invalid status: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Completed => write!(f, "completed"),
            TransactionStatus::Pending => write!(f, "pending"),
        }
    }
}

/// Filter selection: either the wildcard or one exact value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: PartialEq> Selection<T> {
    /// Wildcard matches everything; otherwise the value must be equal
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(selected) => selected == value,
        }
    }
}

impl<T> std::str::FromStr for Selection<T>
where
    T: Wildcard + std::str::FromStr<Err = String>,
{
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(T::WILDCARD) {
            Ok(Selection::All)
        } else {
            s.parse().map(Selection::Only)
        }
    }
}

impl<T> std::fmt::Display for Selection<T>
where
    T: Wildcard + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selection::All => write!(f, "{}", T::WILDCARD),
            Selection::Only(value) => write!(f, "{}", value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_str() {
        assert_eq!("Food & Dining".parse::<Category>().unwrap(), Category::FoodAndDining);
        assert_eq!("bills & utilities".parse::<Category>().unwrap(), Category::BillsAndUtilities);
        assert!("Groceries".parse::<Category>().is_err());
        assert!("All Categories".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serializes_as_label() {
        let json = serde_json::to_string(&Category::FoodAndDining).unwrap();
        assert_eq!(json, "\"Food & Dining\"");
    }

    #[test]
    fn test_account_from_str() {
        assert_eq!("Credit Card".parse::<AccountName>().unwrap(), AccountName::CreditCard);
        assert!("Brokerage".parse::<AccountName>().is_err());
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("completed".parse::<TransactionStatus>().unwrap(), TransactionStatus::Completed);
        assert_eq!("Pending".parse::<TransactionStatus>().unwrap(), TransactionStatus::Pending);
        assert!("failed".parse::<TransactionStatus>().is_err());
    }

    #[test]
    fn test_selection_parsing() {
        assert_eq!("All Categories".parse::<Selection<Category>>().unwrap(), Selection::All);
        assert_eq!("".parse::<Selection<AccountName>>().unwrap(), Selection::All);
        assert_eq!(
            "Income".parse::<Selection<Category>>().unwrap(),
            Selection::Only(Category::Income)
        );
        assert!("Nope".parse::<Selection<Category>>().is_err());
    }

    #[test]
    fn test_selection_display_and_matches() {
        let all: Selection<AccountName> = Selection::All;
        assert_eq!(all.to_string(), "All Accounts");
        assert!(all.matches(&AccountName::SavingsAccount));

        let only = Selection::Only(AccountName::CreditCard);
        assert_eq!(only.to_string(), "Credit Card");
        assert!(only.matches(&AccountName::CreditCard));
        assert!(!only.matches(&AccountName::ChaseChecking));
    }
}
