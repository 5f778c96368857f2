//! In-memory [`Session`] implementations for tests and runnable examples.
//!
//! - [`MockSession`] answers every request kind from deterministic fixture
//!   data, split across partial and final response events.
//! - [`DynamicMockSession`] defers every step to a [`DynamicMockController`]
//!   so tests can script failures, message sequences, and stalls.
//!
//! Both sessions return a `Timeout` event after sleeping for the poll wait
//! once nothing is left to deliver.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use blpframe_core::{
    BlpError, DEFAULT_SERVICE, Event, Message, Request, RequestKind, Session, SessionFactory,
    Value, names,
};
use chrono::{DateTime, Duration as ChronoDuration, NaiveDate, Utc};

mod dynamic;
pub mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockSession, MockBehavior};

use fixtures::{Bar, data};

/// Maximum records per partial response message.
const CHUNK: usize = 100;
/// Upper bound on generated intraday records per request.
const MAX_RECORDS: usize = 2_000;

/// Fixture-backed session.
///
/// Tickers `FAIL` and `TIMEOUT` are special: the first answers with a
/// `responseError`, the second never answers. Reference and historical
/// requests report `BAD_SEC` for tickers without fixtures.
#[derive(Debug, Default)]
pub struct MockSession {
    started: bool,
    service_open: bool,
    queue: VecDeque<Event>,
}

impl MockSession {
    /// Create an unstarted session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory producing a fresh [`MockSession`] per request execution.
    #[must_use]
    pub fn factory() -> Arc<dyn SessionFactory> {
        Arc::new(|| -> Result<Box<dyn Session>, BlpError> { Ok(Box::new(Self::new())) })
    }

    fn respond(request: &Request) -> Vec<Event> {
        let kind = request.kind();
        let securities = requested_securities(request);
        if securities.iter().any(|s| s == "TIMEOUT") {
            return Vec::new();
        }
        if securities.iter().any(|s| s == "FAIL") {
            return vec![fixtures::response(vec![fixtures::response_error(
                kind,
                "BAD_SEC",
                "forced failure",
            )])];
        }
        let messages = match kind {
            RequestKind::IntradayBar => bar_messages(request, &securities),
            RequestKind::IntradayTick => tick_messages(request, &securities),
            RequestKind::ReferenceData => vec![reference_message(request, &securities)],
            RequestKind::HistoricalData => historical_messages(request, &securities),
        };
        fixtures::respond_in_parts(messages)
    }
}

#[async_trait]
impl Session for MockSession {
    async fn start(&mut self) -> bool {
        self.started = true;
        true
    }

    async fn stop(&mut self) {
        self.started = false;
        self.queue.clear();
    }

    async fn open_service(&mut self, name: &str) -> bool {
        self.service_open = self.started && name == DEFAULT_SERVICE;
        self.service_open
    }

    async fn send_request(&mut self, request: Request) -> Result<(), BlpError> {
        if !self.service_open {
            return Err(BlpError::transport("service not open"));
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(operation = request.operation(), "mock session received request");
        self.queue.extend(Self::respond(&request));
        Ok(())
    }

    async fn next_event(&mut self, timeout: Duration) -> Event {
        match self.queue.pop_front() {
            Some(ev) => ev,
            None => {
                tokio::time::sleep(timeout).await;
                Event::timeout()
            }
        }
    }
}

/// Tickers named by a request: `security` or the `securities` array.
#[must_use]
pub fn requested_securities(request: &Request) -> Vec<String> {
    if let Some(sec) = request.get(names::REQ_SECURITY).and_then(Value::as_str) {
        return vec![sec.to_string()];
    }
    request
        .values(names::REQ_SECURITIES)
        .into_iter()
        .filter_map(|v| v.as_str().map(ToString::to_string))
        .collect()
}

fn window(request: &Request) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = request.get(names::REQ_START_DATE_TIME)?.as_datetime()?;
    let end = request.get(names::REQ_END_DATE_TIME)?.as_datetime()?;
    Some((start, end))
}

fn chunked<T>(items: &[T], build: impl Fn(&[T]) -> Message) -> Vec<Message> {
    items.chunks(CHUNK).map(build).collect()
}

fn bar_messages(request: &Request, securities: &[String]) -> Vec<Message> {
    let (Some(security), Some((start, end))) = (securities.first(), window(request)) else {
        return Vec::new();
    };
    let interval = request
        .get(names::REQ_INTERVAL)
        .and_then(Value::as_i64)
        .unwrap_or(1)
        .max(1);
    let mut bars = Vec::new();
    let mut t = start;
    while t < end && bars.len() < MAX_RECORDS {
        bars.push(Bar::flat(t, data::intraday_price(security, t), 100));
        t += ChronoDuration::minutes(interval);
    }
    chunked(&bars, fixtures::bar_message)
}

fn tick_extras(request: &Request) -> Vec<String> {
    request
        .as_element()
        .children()
        .iter()
        .filter(|e| e.get_value().and_then(Value::as_bool) == Some(true))
        .filter_map(|e| e.name().strip_prefix("include"))
        .map(|rest| {
            let mut chars = rest.chars();
            chars.next().map_or_else(String::new, |c| {
                c.to_lowercase().chain(chars).collect::<String>()
            })
        })
        .filter(|name| !name.is_empty())
        .collect()
}

fn tick_messages(request: &Request, securities: &[String]) -> Vec<Message> {
    let (Some(security), Some((start, end))) = (securities.first(), window(request)) else {
        return Vec::new();
    };
    let events: Vec<String> = request
        .values(names::REQ_EVENT_TYPES)
        .into_iter()
        .filter_map(|v| v.as_str().map(ToString::to_string))
        .collect();
    if events.is_empty() {
        return Vec::new();
    }
    let extras = tick_extras(request);
    let mut ticks = Vec::new();
    let mut t = start;
    let mut i = 0usize;
    while t < end && ticks.len() < MAX_RECORDS {
        let event = &events[i % events.len()];
        let extra_values: Vec<(&str, Value)> = extras
            .iter()
            .map(|name| (name.as_str(), Value::from(format!("{name}-{i}"))))
            .collect();
        ticks.push(fixtures::tick(
            t,
            event,
            data::intraday_price(security, t),
            100,
            &extra_values,
        ));
        t += ChronoDuration::seconds(30);
        i += 1;
    }
    ticks
        .chunks(CHUNK)
        .map(|c| fixtures::tick_message(c.to_vec()))
        .collect()
}

fn requested_fields(request: &Request) -> Vec<String> {
    request
        .values(names::REQ_FIELDS)
        .into_iter()
        .filter_map(|v| v.as_str().map(ToString::to_string))
        .collect()
}

fn reference_message(request: &Request, securities: &[String]) -> Message {
    let fields = requested_fields(request);
    let entries = securities
        .iter()
        .map(|sec| match data::reference(sec) {
            None => fixtures::reference_security_error(sec, "BAD_SEC", "Unknown/Invalid security"),
            Some(snapshot) => {
                let present: Vec<(&str, Value)> = snapshot
                    .into_iter()
                    .filter(|(name, _)| fields.iter().any(|f| f == name))
                    .collect();
                let missing: Vec<&str> = fields
                    .iter()
                    .map(String::as_str)
                    .filter(|f| !present.iter().any(|(name, _)| name == f))
                    .collect();
                fixtures::reference_entry(sec, &present, &missing)
            }
        })
        .collect();
    fixtures::reference_message(entries)
}

fn parse_date(request: &Request, name: &str) -> Option<NaiveDate> {
    let raw = request.get(name)?.as_str()?;
    NaiveDate::parse_from_str(raw, "%Y%m%d").ok()
}

fn historical_messages(request: &Request, securities: &[String]) -> Vec<Message> {
    let (Some(start), Some(end)) = (
        parse_date(request, names::REQ_START_DATE),
        parse_date(request, names::REQ_END_DATE),
    ) else {
        return Vec::new();
    };
    let fields = requested_fields(request);
    let field_refs: Vec<&str> = fields.iter().map(String::as_str).collect();
    securities
        .iter()
        .map(|sec| {
            if !data::is_known(sec) {
                return fixtures::historical_security_error(
                    sec,
                    "BAD_SEC",
                    "Unknown/Invalid security",
                );
            }
            let rows: Vec<(NaiveDate, Vec<(String, Value)>)> = start
                .iter_days()
                .take_while(|d| *d <= end)
                .filter_map(|d| data::daily(sec, d, &field_refs).map(|row| (d, row)))
                .collect();
            let borrowed: Vec<(NaiveDate, Vec<(&str, Value)>)> = rows
                .iter()
                .map(|(d, row)| {
                    (
                        *d,
                        row.iter().map(|(k, v)| (k.as_str(), v.clone())).collect(),
                    )
                })
                .collect();
            fixtures::historical_message(sec, &borrowed)
        })
        .collect()
}
