// Core record types shared across the crawl, accumulation and persistence
// layers.

use serde::{Deserialize, Serialize};

/// Which side of a transaction an address appeared on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Input,
    Output,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Input => "input",
            Category::Output => "output",
        }
    }
}

/// A transaction hash paired with its block timestamp, as returned by the
/// window crawl. Consumed immediately, never persisted on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRef {
    pub hash: String,
    pub timestamp: String,
}

/// One address/value pair from a single transaction's inputs or outputs.
#[derive(Debug, Clone)]
pub struct AddressEntry {
    pub address: String,
    pub value: i64,
    pub category: Category,
}

/// The unit of raw persistence. Natural key for deduplication is
/// (hash, category, address, value, timestamp).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerRecord {
    pub hash: String,
    pub address: String,
    pub category: Category,
    pub value: i64,
    pub timestamp: String,
}

impl LedgerRecord {
    pub fn from_entry(tx: &TransactionRef, entry: AddressEntry) -> Self {
        Self {
            hash: tx.hash.clone(),
            address: entry.address,
            category: entry.category,
            value: entry.value,
            timestamp: tx.timestamp.clone(),
        }
    }
}

/// Durable running totals for one address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceRow {
    pub address: String,
    pub total_input: i64,
    pub total_output: i64,
    pub balance: i64,
}
