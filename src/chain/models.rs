// Typed shapes for the upstream response envelopes, plus extraction into
// the crate's own record types. A response that fails to deserialize is a
// shape violation; callers degrade it to an empty result.

use crate::models::{AddressEntry, Category, TransactionRef};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct TransactionsEnvelope {
    data: TransactionsData,
}

#[derive(Debug, Deserialize)]
struct TransactionsData {
    bitcoin: TransactionsChain,
}

#[derive(Debug, Deserialize)]
struct TransactionsChain {
    transactions: Vec<TransactionNode>,
}

#[derive(Debug, Deserialize)]
struct TransactionNode {
    hash: String,
    block: BlockNode,
}

#[derive(Debug, Deserialize)]
struct BlockNode {
    timestamp: TimestampNode,
}

#[derive(Debug, Deserialize)]
struct TimestampNode {
    time: String,
}

#[derive(Debug, Deserialize)]
struct InputsEnvelope {
    data: InputsData,
}

#[derive(Debug, Deserialize)]
struct InputsData {
    bitcoin: InputsChain,
}

#[derive(Debug, Deserialize)]
struct InputsChain {
    inputs: Vec<InputNode>,
}

#[derive(Debug, Deserialize)]
struct InputNode {
    #[serde(rename = "inputAddress")]
    input_address: AddressNode,
    value: i64,
}

#[derive(Debug, Deserialize)]
struct OutputsEnvelope {
    data: OutputsData,
}

#[derive(Debug, Deserialize)]
struct OutputsData {
    bitcoin: OutputsChain,
}

#[derive(Debug, Deserialize)]
struct OutputsChain {
    outputs: Vec<OutputNode>,
}

#[derive(Debug, Deserialize)]
struct OutputNode {
    #[serde(rename = "outputAddress")]
    output_address: AddressNode,
    value: i64,
}

#[derive(Debug, Deserialize)]
struct AddressNode {
    address: String,
}

/// Map a window-crawl response body into transaction refs, preserving the
/// upstream ordering.
pub fn extract_transaction_refs(body: Value) -> Result<Vec<TransactionRef>, serde_json::Error> {
    let envelope: TransactionsEnvelope = serde_json::from_value(body)?;
    Ok(envelope
        .data
        .bitcoin
        .transactions
        .into_iter()
        .map(|tx| TransactionRef {
            hash: tx.hash,
            timestamp: tx.block.timestamp.time,
        })
        .collect())
}

/// Map an inputs response body into debit-side address entries.
pub fn extract_input_entries(body: Value) -> Result<Vec<AddressEntry>, serde_json::Error> {
    let envelope: InputsEnvelope = serde_json::from_value(body)?;
    Ok(envelope
        .data
        .bitcoin
        .inputs
        .into_iter()
        .map(|input| AddressEntry {
            address: input.input_address.address,
            value: input.value,
            category: Category::Input,
        })
        .collect())
}

/// Map an outputs response body into credit-side address entries.
pub fn extract_output_entries(body: Value) -> Result<Vec<AddressEntry>, serde_json::Error> {
    let envelope: OutputsEnvelope = serde_json::from_value(body)?;
    Ok(envelope
        .data
        .bitcoin
        .outputs
        .into_iter()
        .map(|output| AddressEntry {
            address: output.output_address.address,
            value: output.value,
            category: Category::Output,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn transaction_refs_keep_response_order() {
        let body = json!({
            "data": {"bitcoin": {"transactions": [
                {"hash": "aa", "block": {"timestamp": {"time": "2025-01-02 10:00:00"}, "height": 878000}, "index": 5},
                {"hash": "bb", "block": {"timestamp": {"time": "2025-01-02 09:59:00"}, "height": 877999}, "index": 1}
            ]}}
        });

        let refs = extract_transaction_refs(body).unwrap();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].hash, "aa");
        assert_eq!(refs[0].timestamp, "2025-01-02 10:00:00");
        assert_eq!(refs[1].hash, "bb");
    }

    #[test]
    fn malformed_envelope_is_an_error() {
        let body = json!({"data": {"bitcoin": null}});
        assert!(extract_transaction_refs(body).is_err());
    }

    #[test]
    fn input_entries_are_tagged_input() {
        let body = json!({
            "data": {"bitcoin": {"inputs": [
                {"inputAddress": {"address": "addr-a"}, "value": 100}
            ]}}
        });

        let entries = extract_input_entries(body).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].address, "addr-a");
        assert_eq!(entries[0].value, 100);
        assert_eq!(entries[0].category, Category::Input);
    }

    #[test]
    fn output_entries_are_tagged_output() {
        let body = json!({
            "data": {"bitcoin": {"outputs": [
                {"outputAddress": {"address": "addr-b"}, "value": 120}
            ]}}
        });

        let entries = extract_output_entries(body).unwrap();
        assert_eq!(entries[0].category, Category::Output);
    }
}
