use crate::accumulate;
use crate::api::{ApiClient, ApiError};
use crate::chain::{crawler, resolver};
use crate::config::Config;
use crate::db;
use crate::models::LedgerRecord;
use crate::report::ProgressReporter;
use sqlx::{Pool, Sqlite};
use std::time::Instant;
use tokio::time::sleep;
use tracing::{error, info};

/// Where the cycle loop currently is, and how it ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Running,
    Sleeping,
    /// The window produced zero transactions; the remaining cycle budget is
    /// skipped.
    WindowExhaustedStop,
    /// The full iteration budget ran.
    Done,
}

/// Drive repeated crawl → resolve → accumulate → persist cycles on a fixed
/// cadence.
///
/// The page, offset and window are cycle-invariant: every cycle re-fetches
/// the same slice and relies on ledger deduplication to absorb the repeats,
/// while balances deliberately re-accumulate. Only client-level failures
/// escape; persistence errors cost the cycle its writes but never stop the
/// loop.
pub async fn run(
    client: &mut ApiClient,
    pool: &Pool<Sqlite>,
    config: &Config,
    reporter: &dyn ProgressReporter,
) -> Result<SchedulerState, ApiError> {
    let mut state = SchedulerState::Running;

    for cycle in 1..=config.iterations {
        state = SchedulerState::Running;
        info!(cycle, total = config.iterations, "starting ingestion cycle");
        reporter.cycle_started(cycle, config.iterations);
        let started = Instant::now();

        let refs = crawler::fetch_transaction_refs(client, config).await?;
        if refs.is_empty() {
            info!(cycle, "window exhausted, stopping early");
            reporter.window_exhausted();
            state = SchedulerState::WindowExhaustedStop;
            break;
        }

        let mut records: Vec<LedgerRecord> = Vec::new();
        for tx in &refs {
            let inputs = resolver::fetch_input_addresses(client, &tx.hash).await?;
            let outputs = resolver::fetch_output_addresses(client, &tx.hash).await?;

            records.extend(
                inputs
                    .into_iter()
                    .chain(outputs)
                    .map(|entry| LedgerRecord::from_entry(tx, entry)),
            );
        }

        if records.is_empty() {
            reporter.nothing_to_persist();
        } else {
            if let Err(e) = db::ledger::append_ledger(pool, &records).await {
                error!(cycle, error = %e, "failed to append ledger records");
            }

            let totals = accumulate::calculate_totals(&records);
            if let Err(e) = db::balance::apply_balance_deltas(pool, &totals).await {
                error!(cycle, error = %e, "failed to update address balances");
            }

            reporter.records_processed(records.len());
        }

        let elapsed = started.elapsed();
        if cycle < config.iterations {
            state = SchedulerState::Sleeping;
            let pause = config.cycle_period.saturating_sub(elapsed);
            info!(cycle, elapsed_secs = elapsed.as_secs_f64(),
                  pause_secs = pause.as_secs_f64(), "cycle finished, sleeping");
            reporter.cycle_finished(elapsed, Some(pause));
            sleep(pause).await;
        } else {
            state = SchedulerState::Done;
            info!(cycle, elapsed_secs = elapsed.as_secs_f64(), "final cycle finished");
            reporter.cycle_finished(elapsed, None);
        }
    }

    if state == SchedulerState::Running {
        state = SchedulerState::Done;
    }

    Ok(state)
}
