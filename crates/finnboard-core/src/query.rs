//! Transaction query engine
//!
//! Pure functions over an already-loaded record list:
//! - `filter`: search, category and account filters
//! - `sort`: ordering by date, magnitude or description
//! - `aggregate`: income, expense and net totals
//! - `spending_by_category` / `accounts_overview`: breakdowns for the
//!   dashboard and accounts page
//!
//! The engine keeps no state. Callers rebuild a `QueryParams` value on every
//! change and pass it in.
//!
//! Totals are always computed over the full record list, never over the
//! filtered view.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::TransactionRecord;
use crate::types::{AccountName, Category, Selection};

/// Column a view can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Chronological
    Date,
    /// Absolute value of the amount
    Amount,
    /// Byte-wise, case-sensitive string order
    Description,
}

impl std::str::FromStr for SortKey {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "date" => Ok(SortKey::Date),
            "amount" => Ok(SortKey::Amount),
            "description" => Ok(SortKey::Description),
            _ => Err(format!("Invalid sort key: {}", s)),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::Date => write!(f, "date"),
            SortKey::Amount => write!(f, "amount"),
            SortKey::Description => write!(f, "description"),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(format!("Invalid sort order: {}", s)),
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

/// Sort key plus direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub order: SortOrder,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            key: SortKey::Date,
            order: SortOrder::Desc,
        }
    }
}

impl SortSpec {
    pub fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }

    /// Sort after a click on a column header: the same key flips the
    /// direction, a new key starts descending.
    pub fn toggle(self, key: SortKey) -> Self {
        if self.key == key {
            Self {
                key,
                order: self.order.flipped(),
            }
        } else {
            Self {
                key,
                order: SortOrder::Desc,
            }
        }
    }
}

/// Everything the transactions view can be filtered and sorted by
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryParams {
    /// Case-insensitive substring of the description
    pub search: String,
    pub category: Selection<Category>,
    pub account: Selection<AccountName>,
    pub sort: SortSpec,
}

impl QueryParams {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_category(mut self, category: Selection<Category>) -> Self {
        self.category = category;
        self
    }

    pub fn with_account(mut self, account: Selection<AccountName>) -> Self {
        self.account = account;
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    /// Build from query-string pairs (`q`, `category`, `account`, `sort`, `order`).
    /// Missing keys keep their defaults; unknown values are an error.
    pub fn from_map(params: &HashMap<String, String>) -> Result<Self, String> {
        let mut query = QueryParams::default();

        if let Some(q) = params.get("q") {
            query.search = q.clone();
        }
        if let Some(category) = params.get("category") {
            query.category = category.parse()?;
        }
        if let Some(account) = params.get("account") {
            query.account = account.parse()?;
        }
        if let Some(key) = params.get("sort").filter(|s| !s.is_empty()) {
            query.sort.key = key.parse()?;
        }
        if let Some(order) = params.get("order").filter(|s| !s.is_empty()) {
            query.sort.order = order.parse()?;
        }

        Ok(query)
    }
}

/// Income, expense and net totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct Totals {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_flow: Decimal,
}

impl Totals {
    /// Share of income kept, in percent with one decimal place.
    /// `None` when there is no income.
    pub fn savings_rate(&self) -> Option<Decimal> {
        if self.total_income.is_zero() {
            return None;
        }
        let rate = (self.total_income - self.total_expenses) / self.total_income * Decimal::ONE_HUNDRED;
        Some(rate.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
    }
}

/// Filtered and sorted view plus totals over the full list
#[derive(Debug, Clone, Serialize)]
pub struct QueryOutcome<'a> {
    pub view: Vec<&'a TransactionRecord>,
    pub totals: Totals,
}

/// Keep records whose description contains `search_term` (case-insensitive)
/// and whose category and account match the selections.
pub fn filter<'a>(
    records: &'a [TransactionRecord],
    search_term: &str,
    category: Selection<Category>,
    account: Selection<AccountName>,
) -> Vec<&'a TransactionRecord> {
    let needle = search_term.to_lowercase();

    records
        .iter()
        .filter(|r| needle.is_empty() || r.description().to_lowercase().contains(&needle))
        .filter(|r| category.matches(&r.category()))
        .filter(|r| account.matches(&r.account()))
        .collect()
}

fn compare(a: &TransactionRecord, b: &TransactionRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Date => a.date().cmp(&b.date()),
        SortKey::Amount => a.amount().abs().cmp(&b.amount().abs()),
        SortKey::Description => a.description().cmp(b.description()),
    }
}

/// Sort a view. Equal keys keep their input order in both directions.
pub fn sort<'a>(
    mut view: Vec<&'a TransactionRecord>,
    key: SortKey,
    order: SortOrder,
) -> Vec<&'a TransactionRecord> {
    view.sort_by(|a, b| match order {
        SortOrder::Asc => compare(a, b, key),
        SortOrder::Desc => compare(b, a, key),
    });
    view
}

/// Totals over `records`. An empty list gives all zeros.
pub fn aggregate<'a, I>(records: I) -> Totals
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let (total_income, total_expenses) =
        records
            .into_iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(income, expenses), r| {
                if r.is_income() {
                    (income + r.amount(), expenses)
                } else if r.is_expense() {
                    (income, expenses + r.amount().abs())
                } else {
                    (income, expenses)
                }
            });

    Totals {
        total_income,
        total_expenses,
        net_flow: total_income - total_expenses,
    }
}

/// Filter, sort, and total in one pass over the parameters
pub fn run<'a>(records: &'a [TransactionRecord], params: &QueryParams) -> QueryOutcome<'a> {
    let view = filter(records, &params.search, params.category, params.account);
    let view = sort(view, params.sort.key, params.sort.order);

    QueryOutcome {
        view,
        totals: aggregate(records),
    }
}

/// One category's share of total spending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategorySpending {
    pub category: Category,
    /// Spent in this category, as a positive amount
    pub amount: Decimal,
    /// Percent of all expenses, one decimal place
    pub percentage: Decimal,
}

/// Expenses grouped by category, largest first. Categories with no
/// expenses are left out; equal amounts keep drop-down order.
pub fn spending_by_category<'a, I>(records: I) -> Vec<CategorySpending>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let mut spent: HashMap<Category, Decimal> = HashMap::new();
    for r in records.into_iter().filter(|r| r.is_expense()) {
        *spent.entry(r.category()).or_default() += r.amount().abs();
    }
    let total: Decimal = spent.values().copied().sum();

    let mut breakdown: Vec<CategorySpending> = Category::ALL
        .iter()
        .filter_map(|c| spent.get(c).map(|amount| (*c, *amount)))
        .map(|(category, amount)| CategorySpending {
            category,
            amount,
            percentage: (amount / total * Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero),
        })
        .collect();
    breakdown.sort_by(|a, b| b.amount.cmp(&a.amount));
    breakdown
}

/// Activity booked against one account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccountSummary {
    pub account: AccountName,
    pub transaction_count: usize,
    pub totals: Totals,
    /// Signed sum of every amount on the account
    pub balance: Decimal,
}

/// Per-account summaries plus the balance across all accounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct AccountsOverview {
    pub accounts: Vec<AccountSummary>,
    pub total_balance: Decimal,
}

/// Summarise every known account, in drop-down order. Accounts with no
/// records are listed with a zero balance.
pub fn accounts_overview(records: &[TransactionRecord]) -> AccountsOverview {
    let accounts: Vec<AccountSummary> = AccountName::ALL
        .iter()
        .map(|account| {
            let booked: Vec<&TransactionRecord> = records.iter().filter(|r| r.account() == *account).collect();
            AccountSummary {
                account: *account,
                transaction_count: booked.len(),
                totals: aggregate(booked.iter().copied()),
                balance: booked.iter().map(|r| r.amount()).sum(),
            }
        })
        .collect();
    let total_balance = accounts.iter().map(|a| a.balance).sum();

    AccountsOverview {
        accounts,
        total_balance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionStatus;
    use chrono::NaiveDate;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn record(id: u64, date: &str, description: &str, category: Category, account: AccountName, amount: &str) -> TransactionRecord {
        TransactionRecord::new(
            id,
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            description,
            category,
            account,
            dec(amount),
            TransactionStatus::Completed,
        )
    }

    fn scenario() -> Vec<TransactionRecord> {
        vec![
            record(1, "2024-01-15", "Starbucks Coffee", Category::FoodAndDining, AccountName::ChaseChecking, "-5.49"),
            record(2, "2024-01-15", "Salary Deposit", Category::Income, AccountName::ChaseChecking, "5000.00"),
        ]
    }

    fn sample() -> Vec<TransactionRecord> {
        vec![
            record(1, "2024-01-15", "Starbucks Coffee", Category::FoodAndDining, AccountName::ChaseChecking, "-5.49"),
            record(2, "2024-01-15", "Salary Deposit", Category::Income, AccountName::ChaseChecking, "5000.00"),
            record(3, "2024-01-14", "Uber Ride", Category::Transportation, AccountName::ChaseChecking, "-12.30"),
            record(4, "2024-01-14", "Amazon Purchase", Category::Shopping, AccountName::CreditCard, "-89.99"),
            record(5, "2024-01-13", "Netflix Subscription", Category::Entertainment, AccountName::CreditCard, "-15.99"),
            record(6, "2024-01-13", "Grocery Store", Category::FoodAndDining, AccountName::ChaseChecking, "-67.45"),
            record(7, "2024-01-12", "Gas Station", Category::Transportation, AccountName::CreditCard, "-45.20"),
            record(8, "2024-01-12", "Freelance Payment", Category::Income, AccountName::ChaseChecking, "1200.00"),
        ]
    }

    fn ids(view: &[&TransactionRecord]) -> Vec<u64> {
        view.iter().map(|r| r.id()).collect()
    }

    #[test]
    fn test_wildcard_filter_keeps_everything() {
        let records = sample();
        let view = filter(&records, "", Selection::All, Selection::All);
        let mut got = ids(&view);
        got.sort();
        assert_eq!(got, (1..=8).collect::<Vec<_>>());
    }

    #[test]
    fn test_filter_on_empty_list() {
        let view = filter(&[], "coffee", Selection::All, Selection::All);
        assert!(view.is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let records = sample();
        let upper = filter(&records, "STARBUCKS", Selection::All, Selection::All);
        let lower = filter(&records, "starbucks", Selection::All, Selection::All);
        assert_eq!(ids(&upper), vec![1]);
        assert_eq!(ids(&upper), ids(&lower));
    }

    #[test]
    fn test_search_matches_description_only() {
        let records = sample();
        // "Income" is a category label, not part of any description
        let view = filter(&records, "income", Selection::All, Selection::All);
        assert!(view.is_empty());
    }

    #[test]
    fn test_search_salary_scenario() {
        let records = scenario();
        let view = filter(&records, "salary", Selection::All, Selection::All);
        assert_eq!(ids(&view), vec![2]);
    }

    #[test]
    fn test_category_and_account_filters_combine() {
        let records = sample();
        let view = filter(
            &records,
            "",
            Selection::Only(Category::Transportation),
            Selection::Only(AccountName::CreditCard),
        );
        assert_eq!(ids(&view), vec![7]);

        let view = filter(&records, "", Selection::Only(Category::FoodAndDining), Selection::All);
        assert_eq!(ids(&view), vec![1, 6]);

        let view = filter(&records, "", Selection::All, Selection::Only(AccountName::SavingsAccount));
        assert!(view.is_empty());
    }

    #[test]
    fn test_view_is_subset_of_source() {
        let records = sample();
        let view = filter(&records, "e", Selection::All, Selection::All);
        for r in view {
            assert!(records.iter().any(|src| std::ptr::eq(src, r)));
        }
    }

    #[test]
    fn test_sort_amount_by_magnitude() {
        let records = vec![
            record(1, "2024-01-14", "Uber Ride", Category::Transportation, AccountName::ChaseChecking, "-12.30"),
            record(2, "2024-01-14", "Amazon Purchase", Category::Shopping, AccountName::CreditCard, "-89.99"),
            record(3, "2024-01-12", "Freelance Payment", Category::Income, AccountName::ChaseChecking, "1200.00"),
        ];
        let view = sort(records.iter().collect(), SortKey::Amount, SortOrder::Desc);
        let amounts: Vec<Decimal> = view.iter().map(|r| r.amount()).collect();
        assert_eq!(amounts, vec![dec("1200.00"), dec("-89.99"), dec("-12.30")]);
    }

    #[test]
    fn test_large_expense_outranks_small_deposit() {
        let records = vec![
            record(1, "2024-01-01", "Deposit", Category::Income, AccountName::ChaseChecking, "10"),
            record(2, "2024-01-01", "Rent", Category::BillsAndUtilities, AccountName::ChaseChecking, "-500"),
        ];
        let view = sort(records.iter().collect(), SortKey::Amount, SortOrder::Desc);
        assert_eq!(ids(&view), vec![2, 1]);
    }

    #[test]
    fn test_sort_by_date() {
        let records = sample();
        let asc = sort(records.iter().collect(), SortKey::Date, SortOrder::Asc);
        assert_eq!(ids(&asc), vec![7, 8, 5, 6, 3, 4, 1, 2]);

        // Ties keep input order in descending direction too
        let desc = sort(records.iter().collect(), SortKey::Date, SortOrder::Desc);
        assert_eq!(ids(&desc), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_sort_by_description_is_case_sensitive() {
        let records = vec![
            record(1, "2024-01-01", "apple store", Category::Shopping, AccountName::CreditCard, "-1"),
            record(2, "2024-01-01", "Zoo Tickets", Category::Entertainment, AccountName::CreditCard, "-1"),
            record(3, "2024-01-01", "Bakery", Category::FoodAndDining, AccountName::CreditCard, "-1"),
        ];
        let view = sort(records.iter().collect(), SortKey::Description, SortOrder::Asc);
        assert_eq!(ids(&view), vec![3, 2, 1]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let records = sample();
        for key in [SortKey::Date, SortKey::Amount, SortKey::Description] {
            for order in [SortOrder::Asc, SortOrder::Desc] {
                let once = sort(records.iter().collect(), key, order);
                let twice = sort(once.clone(), key, order);
                assert_eq!(ids(&once), ids(&twice));
            }
        }
    }

    #[test]
    fn test_sort_toggle() {
        let spec = SortSpec::default();
        assert_eq!(spec, SortSpec::new(SortKey::Date, SortOrder::Desc));

        let spec = spec.toggle(SortKey::Date);
        assert_eq!(spec, SortSpec::new(SortKey::Date, SortOrder::Asc));

        let spec = spec.toggle(SortKey::Amount);
        assert_eq!(spec, SortSpec::new(SortKey::Amount, SortOrder::Desc));

        let spec = spec.toggle(SortKey::Amount);
        assert_eq!(spec, SortSpec::new(SortKey::Amount, SortOrder::Asc));
    }

    #[test]
    fn test_aggregate_scenario() {
        let totals = aggregate(&scenario());
        assert_eq!(totals.total_income, dec("5000.00"));
        assert_eq!(totals.total_expenses, dec("5.49"));
        assert_eq!(totals.net_flow, dec("4994.51"));
    }

    #[test]
    fn test_aggregate_empty() {
        let totals = aggregate(&Vec::<TransactionRecord>::new());
        assert_eq!(totals, Totals::default());
        assert!(totals.net_flow.is_zero());
        assert_eq!(totals.savings_rate(), None);
    }

    #[test]
    fn test_net_flow_identity() {
        let records = sample();
        let totals = aggregate(&records);
        assert_eq!(totals.net_flow, totals.total_income - totals.total_expenses);
        assert_eq!(totals.total_income, dec("6200.00"));
        assert_eq!(totals.total_expenses, dec("236.42"));
    }

    #[test]
    fn test_totals_ignore_filters() {
        let records = sample();
        let params = QueryParams::default()
            .with_search("coffee")
            .with_category(Selection::Only(Category::FoodAndDining));

        let outcome = run(&records, &params);
        assert_eq!(ids(&outcome.view), vec![1]);
        // Totals come from the full list, not the one-row view
        assert_eq!(outcome.totals, aggregate(&records));
        assert_ne!(outcome.totals, aggregate(outcome.view.iter().copied()));
    }

    #[test]
    fn test_run_sorts_filtered_view() {
        let records = sample();
        let params = QueryParams::default()
            .with_account(Selection::Only(AccountName::CreditCard))
            .with_sort(SortSpec::new(SortKey::Amount, SortOrder::Asc));
        let outcome = run(&records, &params);
        assert_eq!(ids(&outcome.view), vec![5, 7, 4]);
    }

    #[test]
    fn test_savings_rate() {
        let totals = Totals {
            total_income: dec("5700"),
            total_expenses: dec("4200"),
            net_flow: dec("1500"),
        };
        assert_eq!(totals.savings_rate(), Some(dec("26.3")));
    }

    #[test]
    fn test_params_from_map() {
        let mut map = HashMap::new();
        map.insert("q".to_string(), "uber".to_string());
        map.insert("category".to_string(), "Transportation".to_string());
        map.insert("account".to_string(), "All Accounts".to_string());
        map.insert("sort".to_string(), "amount".to_string());
        map.insert("order".to_string(), "asc".to_string());

        let params = QueryParams::from_map(&map).unwrap();
        assert_eq!(params.search, "uber");
        assert_eq!(params.category, Selection::Only(Category::Transportation));
        assert_eq!(params.account, Selection::All);
        assert_eq!(params.sort, SortSpec::new(SortKey::Amount, SortOrder::Asc));

        assert_eq!(QueryParams::from_map(&HashMap::new()).unwrap(), QueryParams::default());
    }

    #[test]
    fn test_params_from_map_rejects_unknown_values() {
        let mut map = HashMap::new();
        map.insert("sort".to_string(), "payee".to_string());
        assert!(QueryParams::from_map(&map).is_err());

        let mut map = HashMap::new();
        map.insert("category".to_string(), "Travel".to_string());
        assert!(QueryParams::from_map(&map).is_err());
    }

    #[test]
    fn test_spending_by_category() {
        let records = sample();
        let breakdown = spending_by_category(&records);
        let expenses = aggregate(&records).total_expenses;

        let amounts: Decimal = breakdown.iter().map(|c| c.amount).sum();
        assert_eq!(amounts, expenses);
        assert!(breakdown.iter().all(|c| c.category != Category::Income));
        assert!(breakdown.windows(2).all(|w| w[0].amount >= w[1].amount));
    }

    #[test]
    fn test_spending_by_category_empty() {
        assert!(spending_by_category(&Vec::<TransactionRecord>::new()).is_empty());

        let income_only = vec![record(1, "2024-01-15", "Salary", Category::Income, AccountName::ChaseChecking, "100.00")];
        assert!(spending_by_category(&income_only).is_empty());
    }

    #[test]
    fn test_spending_ties_keep_category_order() {
        let records = vec![
            record(1, "2024-01-15", "Bus", Category::Transportation, AccountName::ChaseChecking, "-10.00"),
            record(2, "2024-01-15", "Lunch", Category::FoodAndDining, AccountName::ChaseChecking, "-10.00"),
            record(3, "2024-01-15", "Pharmacy", Category::Healthcare, AccountName::ChaseChecking, "-10.00"),
        ];
        let breakdown = spending_by_category(&records);
        let order: Vec<Category> = breakdown.iter().map(|c| c.category).collect();
        assert_eq!(order, vec![Category::FoodAndDining, Category::Transportation, Category::Healthcare]);
        assert_eq!(breakdown[0].percentage, dec("33.3"));
    }

    #[test]
    fn test_accounts_overview() {
        let records = sample();
        let overview = accounts_overview(&records);

        assert_eq!(overview.accounts.len(), AccountName::ALL.len());
        let count: usize = overview.accounts.iter().map(|a| a.transaction_count).sum();
        assert_eq!(count, records.len());
        // Zero amounts move nothing, so the balance equals net flow
        assert_eq!(overview.total_balance, aggregate(&records).net_flow);
        for account in &overview.accounts {
            assert_eq!(account.balance, account.totals.net_flow);
        }
    }

    #[test]
    fn test_accounts_overview_lists_idle_accounts() {
        let records = vec![record(1, "2024-01-15", "Rent", Category::BillsAndUtilities, AccountName::CreditCard, "-900.00")];
        let overview = accounts_overview(&records);
        let savings = overview
            .accounts
            .iter()
            .find(|a| a.account == AccountName::SavingsAccount)
            .unwrap();
        assert_eq!(savings.transaction_count, 0);
        assert_eq!(savings.balance, Decimal::ZERO);
        assert_eq!(overview.total_balance, dec("-900.00"));
    }
}
