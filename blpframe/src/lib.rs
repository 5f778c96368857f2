//! blpframe turns provider sessions into flat, typed result tables.
//!
//! Overview
//! - Builds one provider request per call (or per security for bar and tick
//!   data), drives a session's event loop until the final response, and
//!   assembles the collected records into a [`Table`].
//! - Four request kinds: intraday bars, intraday ticks, reference data and
//!   daily historical data. All are served by `//blp/refdata`.
//! - Every session is started, used for exactly one request and stopped
//!   exactly once, whatever the outcome.
//!
//! Key behaviors and trade-offs
//! - Fan-out: bar and tick requests take one security each, so a list of
//!   securities runs one session lifecycle per security. `FanOut::Sequential`
//!   keeps a single session open at a time; `FanOut::Concurrent` overlaps up
//!   to `limit` sessions. Results are concatenated in input order and the
//!   first failure aborts the batch.
//! - Errors: provider error envelopes do not stop the event loop; they are
//!   collected and surfaced as `ProviderResponse` once the session is
//!   stopped. Absent fields are null cells, never errors.
//! - Repeated row keys: last write wins by default, keeping the first-seen row
//!   position. `DuplicateKeys::KeepAll` keeps every row instead.
//!
//! Examples
//! ```rust,ignore
//! use blpframe::Blp;
//! use blpframe_mock::MockSession;
//!
//! let blp = Blp::builder()
//!     .session_factory(MockSession::factory())
//!     .build()?;
//!
//! let px = blp
//!     .reference_data(["AAPL US Equity", "IBM US Equity"], ["PX_LAST", "NAME"], None, None)
//!     .await?;
//! let hist = blp
//!     .historical_data("AAPL US Equity", ["PX_LAST", "VOLUME"], start, end, None, None)
//!     .await?;
//! ```
//!
//! See `blpframe/examples/` for runnable demonstrations against the mock session.
#![warn(missing_docs)]

pub(crate) mod core;
mod engine;
mod router;

pub use core::{Blp, BlpBuilder};
pub use engine::request_builder::tick_extra_columns;

// Re-export core types for convenience
pub use blpframe_core::{
    BlpConfig, BlpError, DEFAULT_POLL_TIMEOUT, DEFAULT_SERVICE, DuplicateKeys, Element,
    Event, EventKind, FanOut, Fields, HistoricalDataSpec, IntradayBarSpec,
    IntradayTickSpec, Message, Params, ReferenceDataSpec, Request, RequestKind, RequestSpec,
    ResponseError, Row, Securities, Service, Session, SessionFactory, Table, Value,
};

#[cfg(feature = "dataframe")]
pub use blpframe_core::DataFrame;
