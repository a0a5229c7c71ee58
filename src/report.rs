// Operator-facing progress output, kept separate from the structured event
// log so either sink can be swapped or muted independently.

use std::time::Duration;

pub trait ProgressReporter: Send + Sync {
    fn cycle_started(&self, cycle: u32, total: u32);
    fn window_exhausted(&self);
    fn records_processed(&self, count: usize);
    fn nothing_to_persist(&self);
    fn cycle_finished(&self, elapsed: Duration, pause: Option<Duration>);
}

/// Coarse progress lines on stdout, one per event.
pub struct StdoutReporter;

impl ProgressReporter for StdoutReporter {
    fn cycle_started(&self, cycle: u32, total: u32) {
        println!("Starting cycle {cycle} of {total}");
    }

    fn window_exhausted(&self) {
        println!("No new transactions.");
    }

    fn records_processed(&self, count: usize) {
        println!("Processed {count} records in total.");
    }

    fn nothing_to_persist(&self) {
        println!("No data to write to the database.");
    }

    fn cycle_finished(&self, elapsed: Duration, pause: Option<Duration>) {
        if let Some(pause) = pause {
            println!("Waiting {:.2} seconds before the next check...", pause.as_secs_f64());
        }
        println!("Cycle complete. Time spent: {:.2} seconds.", elapsed.as_secs_f64());
    }
}

/// Discards every event. Used where progress output would be noise.
pub struct NullReporter;

impl ProgressReporter for NullReporter {
    fn cycle_started(&self, _cycle: u32, _total: u32) {}
    fn window_exhausted(&self) {}
    fn records_processed(&self, _count: usize) {}
    fn nothing_to_persist(&self) {}
    fn cycle_finished(&self, _elapsed: Duration, _pause: Option<Duration>) {}
}
