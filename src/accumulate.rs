// Pure per-cycle balance accumulation. No I/O; the totals only exist to
// compute the deltas applied to the durable balances.

use crate::models::{Category, LedgerRecord};
use std::collections::HashMap;

/// Per-address value sums for one ingestion cycle, split by side.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CycleTotals {
    pub input: HashMap<String, i64>,
    pub output: HashMap<String, i64>,
}

impl CycleTotals {
    pub fn is_empty(&self) -> bool {
        self.input.is_empty() && self.output.is_empty()
    }

    /// Union of addresses seen on either side, in a stable order.
    pub fn addresses(&self) -> Vec<&str> {
        let mut addresses: Vec<&str> = self
            .input
            .keys()
            .chain(self.output.keys())
            .map(String::as_str)
            .collect();
        addresses.sort_unstable();
        addresses.dedup();
        addresses
    }
}

/// Fold a batch of ledger records into per-address input and output sums.
/// Addition is commutative, so batch order never affects the totals.
pub fn calculate_totals(records: &[LedgerRecord]) -> CycleTotals {
    let mut totals = CycleTotals::default();

    for record in records {
        let side = match record.category {
            Category::Input => &mut totals.input,
            Category::Output => &mut totals.output,
        };
        *side.entry(record.address.clone()).or_insert(0) += record.value;
    }

    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(address: &str, value: i64, category: Category) -> LedgerRecord {
        LedgerRecord {
            hash: "hash-0".to_string(),
            address: address.to_string(),
            category,
            value,
            timestamp: "2025-01-02 10:00:00".to_string(),
        }
    }

    #[test]
    fn sums_per_address_and_side() {
        let records = vec![
            record("A", 100, Category::Input),
            record("B", 50, Category::Input),
            record("C", 120, Category::Output),
        ];

        let totals = calculate_totals(&records);
        assert_eq!(totals.input.get("A"), Some(&100));
        assert_eq!(totals.input.get("B"), Some(&50));
        assert_eq!(totals.output.get("C"), Some(&120));
        assert_eq!(totals.addresses(), vec!["A", "B", "C"]);
    }

    #[test]
    fn merges_repeated_addresses_on_one_side() {
        let records = vec![
            record("A", 100, Category::Input),
            record("A", 50, Category::Input),
            record("A", 30, Category::Output),
        ];

        let totals = calculate_totals(&records);
        assert_eq!(totals.input.get("A"), Some(&150));
        assert_eq!(totals.output.get("A"), Some(&30));
        assert_eq!(totals.addresses(), vec!["A"]);
    }

    #[test]
    fn totals_are_order_independent() {
        let mut records = vec![
            record("A", 100, Category::Input),
            record("B", 50, Category::Input),
            record("A", 120, Category::Output),
            record("B", 7, Category::Output),
        ];

        let forward = calculate_totals(&records);
        records.reverse();
        let reversed = calculate_totals(&records);

        assert_eq!(forward, reversed);
    }

    #[test]
    fn empty_batch_produces_empty_totals() {
        let totals = calculate_totals(&[]);
        assert!(totals.is_empty());
        assert!(totals.addresses().is_empty());
    }
}
