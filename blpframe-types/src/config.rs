//! Configuration types for the blpframe client.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Service that serves all four request kinds.
pub const DEFAULT_SERVICE: &str = "//blp/refdata";

/// Default bounded wait for a single `next_event` poll.
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_millis(20);

/// How a multi-security call over a per-ticker request kind is executed.
///
/// Every ticker always gets its own session and record store; this only
/// decides whether those lifecycles overlap. Results are concatenated in
/// input order either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum FanOut {
    /// One session lifecycle after the other; the first failure aborts the batch.
    #[default]
    Sequential,
    /// Up to `limit` session lifecycles in flight at once.
    ///
    /// All started lifecycles run to completion (so every session is stopped)
    /// before the first failure, in input order, is reported.
    Concurrent {
        /// Maximum number of sessions open at the same time (>= 1).
        limit: usize,
    },
}

/// Policy for rows whose natural key repeats within one event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum DuplicateKeys {
    /// Replace the earlier row's values; the row keeps its first-seen position.
    #[default]
    LastWriteWins,
    /// Keep every row in arrival order.
    KeepAll,
}

/// Global configuration for the `Blp` client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlpConfig {
    /// Provider service opened on every session.
    pub service: String,
    /// Bounded wait for each `next_event` poll. Must be non-zero.
    pub poll_timeout: Duration,
    /// Optional deadline for one session lifecycle (request, poll loop).
    ///
    /// On expiry the session is still stopped and `RequestTimeout` is returned.
    pub request_timeout: Option<Duration>,
    /// Execution mode for per-ticker fan-out.
    pub fan_out: FanOut,
    /// Handling of repeated row keys.
    pub duplicate_keys: DuplicateKeys,
}

impl Default for BlpConfig {
    fn default() -> Self {
        Self {
            service: DEFAULT_SERVICE.to_string(),
            poll_timeout: DEFAULT_POLL_TIMEOUT,
            request_timeout: None,
            fan_out: FanOut::default(),
            duplicate_keys: DuplicateKeys::default(),
        }
    }
}
