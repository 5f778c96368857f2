//! Shared blpframe types: the workspace error, request kinds, cell values, and
//! client configuration.
#![warn(missing_docs)]

mod config;
mod error;
mod kind;
mod params;
mod value;

pub use config::{BlpConfig, DEFAULT_POLL_TIMEOUT, DEFAULT_SERVICE, DuplicateKeys, FanOut};
pub use error::{BlpError, ResponseError};
pub use kind::RequestKind;
pub use params::Params;
pub use value::Value;
