pub mod balance;
pub mod connection;
pub mod ledger;

// Schema statements, executed one by one at connection time.
pub const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS ledger_entries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        hash TEXT NOT NULL,
        address TEXT NOT NULL,
        category TEXT NOT NULL,
        value INTEGER NOT NULL,
        timestamp TEXT NOT NULL,
        UNIQUE (hash, category, address, value, timestamp)
    )",
    "CREATE TABLE IF NOT EXISTS address_balances (
        address TEXT PRIMARY KEY,
        total_input INTEGER NOT NULL DEFAULT 0,
        total_output INTEGER NOT NULL DEFAULT 0,
        balance INTEGER NOT NULL DEFAULT 0
    )",
    "CREATE INDEX IF NOT EXISTS idx_ledger_entries_address
     ON ledger_entries(address)",
    "CREATE INDEX IF NOT EXISTS idx_ledger_entries_timestamp
     ON ledger_entries(timestamp)",
];
