pub mod crawler;
pub mod models;
pub mod queries;
pub mod resolver;

// Re-exports for convenience
pub use crawler::fetch_transaction_refs;
pub use resolver::{fetch_input_addresses, fetch_output_addresses};
