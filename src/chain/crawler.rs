use crate::api::{ApiClient, ApiError};
use crate::chain::models::extract_transaction_refs;
use crate::chain::queries::TRANSACTIONS_QUERY;
use crate::config::Config;
use crate::models::TransactionRef;
use serde_json::json;
use tracing::{error, info};

/// Fetch one page of transaction hashes for the configured time window.
///
/// A client-level failure (attempt budget burned, or no credential left) is
/// fatal for the run and propagates. A response that parses but lacks the
/// expected fields is only a shape violation: it is logged and yields an
/// empty page.
pub async fn fetch_transaction_refs(
    client: &mut ApiClient,
    config: &Config,
) -> Result<Vec<TransactionRef>, ApiError> {
    let variables = json!({
        "network": config.network,
        "limit": config.page_limit,
        "offset": config.page_offset,
        "from": config.from_time.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        "till": config.till_time.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
    });

    let body = client.execute(TRANSACTIONS_QUERY, variables).await?;

    match extract_transaction_refs(body) {
        Ok(refs) => {
            info!(count = refs.len(), "fetched transaction page");
            Ok(refs)
        }
        Err(e) => {
            error!(error = %e, "unexpected shape in transactions response");
            Ok(Vec::new())
        }
    }
}
