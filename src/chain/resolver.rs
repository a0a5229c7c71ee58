use crate::api::{ApiClient, ApiError};
use crate::chain::models::{extract_input_entries, extract_output_entries};
use crate::chain::queries::{INPUTS_QUERY, OUTPUTS_QUERY};
use crate::models::AddressEntry;
use serde_json::json;
use tracing::{debug, error, warn};

/// Fetch the debit-side address/value pairs of one transaction.
///
/// A transaction whose addresses cannot be resolved is skipped for that
/// side: attempt exhaustion and shape violations both degrade to an empty
/// list. Only credential exhaustion propagates.
pub async fn fetch_input_addresses(
    client: &mut ApiClient,
    tx_hash: &str,
) -> Result<Vec<AddressEntry>, ApiError> {
    let body = match client.execute(INPUTS_QUERY, json!({ "hash": tx_hash })).await {
        Ok(body) => body,
        Err(ApiError::CredentialsExhausted) => return Err(ApiError::CredentialsExhausted),
        Err(e) => {
            warn!(%tx_hash, error = %e, "no input data for transaction");
            return Ok(Vec::new());
        }
    };

    match extract_input_entries(body) {
        Ok(entries) => {
            debug!(%tx_hash, count = entries.len(), "resolved input addresses");
            Ok(entries)
        }
        Err(e) => {
            error!(%tx_hash, error = %e, "unexpected shape in inputs response");
            Ok(Vec::new())
        }
    }
}

/// Fetch the credit-side address/value pairs of one transaction. Same
/// degradation rules as the input side.
pub async fn fetch_output_addresses(
    client: &mut ApiClient,
    tx_hash: &str,
) -> Result<Vec<AddressEntry>, ApiError> {
    let body = match client.execute(OUTPUTS_QUERY, json!({ "hash": tx_hash })).await {
        Ok(body) => body,
        Err(ApiError::CredentialsExhausted) => return Err(ApiError::CredentialsExhausted),
        Err(e) => {
            warn!(%tx_hash, error = %e, "no output data for transaction");
            return Ok(Vec::new());
        }
    };

    match extract_output_entries(body) {
        Ok(entries) => {
            debug!(%tx_hash, count = entries.len(), "resolved output addresses");
            Ok(entries)
        }
        Err(e) => {
            error!(%tx_hash, error = %e, "unexpected shape in outputs response");
            Ok(Vec::new())
        }
    }
}
