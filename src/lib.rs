pub mod accumulate;
pub mod api;
pub mod chain;
pub mod config;
pub mod db;
pub mod models;
pub mod report;
pub mod scheduler;

#[cfg(test)]
pub mod tests;

// Re-export specific items for convenience
pub use accumulate::{calculate_totals, CycleTotals};
pub use api::{ApiClient, ApiError, CredentialRotator};
pub use config::Config;
pub use models::{AddressEntry, BalanceRow, Category, LedgerRecord, TransactionRef};
pub use report::{NullReporter, ProgressReporter, StdoutReporter};
pub use scheduler::SchedulerState;
