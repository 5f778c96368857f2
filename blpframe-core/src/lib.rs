//! blpframe-core
//!
//! Collaborator contracts and data model shared across the blpframe crates.
//!
//! - `session`: the [`Session`] and [`SessionFactory`] traits wrapping the
//!   provider transport.
//! - `event`, `element`: the typed, nested message model delivered by a
//!   session.
//! - `request`: service handles and mutable request objects.
//! - `request_spec`: immutable per-kind request descriptions.
//! - `table`: the ordered row store returned to callers.
//! - `names`: well-known element names of the reference-data service.
//!
//! The session contract is async (`async-trait`) and assumes a Tokio 1.x
//! runtime in the caller.
#![warn(missing_docs)]

mod element;
mod event;
pub mod names;
mod request;
mod request_spec;
mod session;
mod table;

#[cfg(feature = "dataframe")]
mod dataframe;

pub use blpframe_types::{
    BlpConfig, BlpError, DEFAULT_POLL_TIMEOUT, DEFAULT_SERVICE, DuplicateKeys, FanOut, Params,
    RequestKind, ResponseError, Value,
};
pub use element::Element;
pub use event::{Event, EventKind, Message};
pub use request::{Request, Service};
pub use request_spec::{
    Fields, HistoricalDataSpec, IntradayBarSpec, IntradayTickSpec, ReferenceDataSpec, RequestSpec,
    Securities,
};
pub use session::{Session, SessionFactory};
pub use table::{Row, Table};

#[cfg(feature = "dataframe")]
pub use polars::prelude::DataFrame;
