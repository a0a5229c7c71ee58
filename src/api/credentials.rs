use tracing::{error, warn};

/// Ordered set of upstream API keys with a cursor over the active one.
///
/// The cursor only ever moves forward. Once `advance` runs off the end the
/// set is exhausted for the remainder of the process; there is no time-based
/// reset.
#[derive(Debug)]
pub struct CredentialRotator {
    keys: Vec<String>,
    current: usize,
}

impl CredentialRotator {
    /// `keys` must be non-empty; `Config::from_env` enforces that before
    /// construction.
    pub fn new(keys: Vec<String>) -> Self {
        Self { keys, current: 0 }
    }

    /// The key used to sign the next request.
    pub fn current(&self) -> &str {
        &self.keys[self.current]
    }

    /// 0-based position of the active key.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Move to the next key. Returns false when none remain, which the
    /// caller must treat as terminal for the whole pipeline.
    pub fn advance(&mut self) -> bool {
        if self.current < self.keys.len() - 1 {
            self.current += 1;
            warn!(key_index = self.current, "switched to next API key");
            true
        } else {
            error!("all API keys exhausted");
            false
        }
    }
}
