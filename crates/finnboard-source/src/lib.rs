//! Record sources for finnboard
//!
//! A record source hands the core a finite list of transaction and budget
//! rows. Absence of data is an empty list, never an error.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

pub mod error;
pub mod fixture;
pub mod types;

pub use error::SourceError;
pub use types::{BudgetRow, DataFile, TransactionRow};

// ==================== Source Trait ====================

/// Source reference type
pub type SourceRef = Arc<dyn RecordSourceTrait>;

/// Trait for record sources
#[async_trait]
pub trait RecordSourceTrait: Send + Sync {
    /// Load every transaction and budget row in one read, so both lists
    /// come from the same version of the data
    async fn load_all(&self) -> Result<DataFile, SourceError>;

    /// Short human-readable description for logs
    fn describe(&self) -> String;
}

/// Serves the built-in sample data
#[derive(Debug, Default)]
pub struct FixtureSource;

#[async_trait]
impl RecordSourceTrait for FixtureSource {
    async fn load_all(&self) -> Result<DataFile, SourceError> {
        Ok(DataFile {
            transactions: fixture::transaction_rows(),
            budgets: fixture::budget_rows(),
        })
    }

    fn describe(&self) -> String {
        "built-in fixture".to_string()
    }
}

/// Reads a JSON data file with `transactions` and `budgets` arrays
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl RecordSourceTrait for JsonFileSource {
    async fn load_all(&self) -> Result<DataFile, SourceError> {
        let content = tokio::fs::read_to_string(&self.path).await?;

        // An empty file counts as no data
        if content.trim().is_empty() {
            return Ok(DataFile::default());
        }

        let data: DataFile = serde_json::from_str(&content).map_err(|e| SourceError::Malformed {
            location: format!("{}:{}:{}", self.path.display(), e.line(), e.column()),
            message: e.to_string(),
        })?;
        log::debug!(
            "Read {} transaction rows and {} budget rows from {}",
            data.transactions.len(),
            data.budgets.len(),
            self.path.display()
        );
        Ok(data)
    }

    fn describe(&self) -> String {
        format!("JSON file {}", self.path.display())
    }
}
