//! Message builders and canned data shared by the mock sessions and tests.

pub mod data;
pub mod messages;

pub use messages::*;
