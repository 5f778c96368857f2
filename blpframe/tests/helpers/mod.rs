// Re-export helpers so tests can `use helpers::*;`
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use blpframe::{Blp, FanOut, SessionFactory};
use blpframe_mock::{DynamicMockController, DynamicMockSession, MockSession};

/// Common ticker constants used across tests.
pub const AAPL: &str = "AAPL US Equity";
pub const IBM: &str = "IBM US Equity";
pub const MSFT: &str = "MSFT US Equity";
pub const X: &str = "X";

/// Construct a UTC `DateTime` from components for readability in tests.
pub fn dt(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32) -> chrono::DateTime<chrono::Utc> {
    let date = chrono::NaiveDate::from_ymd_opt(y, m, d).expect("invalid date");
    let naive = date
        .and_hms_opt(hh, mm, ss)
        .expect("invalid time components");
    chrono::DateTime::<chrono::Utc>::from_naive_utc_and_offset(naive, chrono::Utc)
}

/// Construct a calendar date.
pub fn date(y: i32, m: u32, d: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(y, m, d).expect("invalid date")
}

/// Client over the fixture-backed mock session.
pub fn fixture_blp() -> Blp {
    blp_with(MockSession::factory(), FanOut::Sequential)
}

/// Client over a scripted session factory plus its controller.
pub fn dynamic_blp(fan_out: FanOut) -> (Blp, DynamicMockController) {
    let (factory, ctrl) = DynamicMockSession::new_with_controller();
    (blp_with(factory, fan_out), ctrl)
}

/// Client over a scripted session factory with a request deadline.
pub fn dynamic_blp_with_deadline(deadline: Duration) -> (Blp, DynamicMockController) {
    let (factory, ctrl) = DynamicMockSession::new_with_controller();
    let blp = Blp::builder()
        .session_factory(factory)
        .request_timeout(deadline)
        .build()
        .unwrap();
    (blp, ctrl)
}

pub fn blp_with(factory: Arc<dyn SessionFactory>, fan_out: FanOut) -> Blp {
    Blp::builder()
        .session_factory(factory)
        .poll_timeout(Duration::from_millis(5))
        .fan_out(fan_out)
        .build()
        .unwrap()
}

/// Tickers of a table's `ticker` key level, top to bottom.
pub fn tickers(table: &blpframe::Table) -> Vec<String> {
    table
        .index_level("ticker")
        .unwrap()
        .into_iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect()
}
