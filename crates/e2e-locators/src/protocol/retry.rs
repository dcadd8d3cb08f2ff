// Click with retry - Bounded retry for transient visibility races
//
// Each attempt: resolve -> wait visible -> click. A failed attempt sleeps a
// fixed backoff and tries again; the last attempt's error is returned as-is.
// No exponential backoff, no jitter.

use crate::error::Result;
use crate::protocol::descriptor::Descriptor;
use crate::protocol::engine::Engine;
use crate::protocol::resolver::resolve;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default number of click attempts
pub const DEFAULT_MAX_ATTEMPTS: i32 = 3;

/// Default pause between attempts
pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(1);

/// Default time each attempt waits for visibility
pub const DEFAULT_VISIBLE_TIMEOUT: Duration = Duration::from_secs(10);

/// Options for `click_with_retry`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetryOptions {
    /// Total attempts including the first. Values <= 0 are treated as 1.
    pub max_attempts: i32,
    /// Fixed pause between attempts
    #[serde(with = "duration_ms")]
    pub backoff: Duration,
    /// How long each attempt waits for the element to become visible
    #[serde(with = "duration_ms")]
    pub visible_timeout: Duration,
}

impl Default for RetryOptions {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff: DEFAULT_BACKOFF,
            visible_timeout: DEFAULT_VISIBLE_TIMEOUT,
        }
    }
}

impl RetryOptions {
    /// Creates new RetryOptions with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_attempts(mut self, max_attempts: i32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn visible_timeout(mut self, timeout: Duration) -> Self {
        self.visible_timeout = timeout;
        self
    }

    /// Attempts that will actually be made (never zero).
    pub fn effective_attempts(&self) -> u32 {
        self.max_attempts.max(1) as u32
    }
}

/// Clicks the element described by `descriptor`, retrying transient failures.
///
/// Transient failures are `ElementNotFound`, `NotVisible`, `NotActionable`
/// and `Timeout`. Any other error (a disabled control, a closed page) is
/// returned on the spot without using up the remaining attempts. After the
/// final attempt the underlying error is propagated unchanged.
pub async fn click_with_retry<E: Engine + ?Sized>(
    engine: &E,
    descriptor: &Descriptor,
    options: Option<RetryOptions>,
) -> Result<()> {
    let options = options.unwrap_or_default();
    let attempts = options.effective_attempts();

    let mut attempt = 1;
    loop {
        // Re-resolve every attempt; the document may have been replaced.
        let target = resolve(engine, descriptor);

        let outcome = match engine.wait_visible(&target, options.visible_timeout).await {
            Ok(()) => engine.click(&target).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(()) => return Ok(()),
            Err(e) if attempt < attempts && e.is_transient() => {
                tracing::warn!(
                    "Click on {} failed (attempt {}/{}): {}",
                    target,
                    attempt,
                    attempts,
                    e
                );
                tokio::time::sleep(options.backoff).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

pub(crate) mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let ms = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempts_never_zero() {
        assert_eq!(RetryOptions::new().max_attempts(0).effective_attempts(), 1);
        assert_eq!(RetryOptions::new().max_attempts(-4).effective_attempts(), 1);
        assert_eq!(RetryOptions::new().effective_attempts(), 3);
    }

    #[test]
    fn test_options_serialization() {
        let options = RetryOptions::new().backoff(Duration::from_millis(250));
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["maxAttempts"], 3);
        assert_eq!(json["backoff"], 250);
        assert_eq!(json["visibleTimeout"], 10000);
    }
}
