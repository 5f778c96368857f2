//! Builders for provider messages and events in the reference-data layout.

use blpframe_core::{Element, Event, EventKind, Message, RequestKind, Value, names};
use chrono::{DateTime, NaiveDate, Utc};

/// Message type of the response to a request kind, e.g. `IntradayBarResponse`.
#[must_use]
pub fn response_type(kind: RequestKind) -> String {
    kind.operation().replace("Request", "Response")
}

/// One OHLC bar record.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Bar start.
    pub time: DateTime<Utc>,
    /// Open.
    pub open: f64,
    /// High.
    pub high: f64,
    /// Low.
    pub low: f64,
    /// Close.
    pub close: f64,
    /// Volume.
    pub volume: i64,
    /// Number of events aggregated.
    pub num_events: i64,
    /// Traded value, rounded to whole currency units.
    pub value: i64,
}

impl Bar {
    /// A flat bar at `price`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn flat(time: DateTime<Utc>, price: f64, volume: i64) -> Self {
        Self {
            time,
            open: price,
            high: price,
            low: price,
            close: price,
            volume,
            num_events: 1,
            value: (price * volume as f64).round() as i64,
        }
    }

    fn to_element(&self) -> Element {
        Element::sequence(
            names::BAR_TICK_DATA,
            vec![
                Element::value(names::TIME, self.time),
                Element::value(names::OPEN, self.open),
                Element::value(names::HIGH, self.high),
                Element::value(names::LOW, self.low),
                Element::value(names::CLOSE, self.close),
                Element::value(names::VOLUME, self.volume),
                Element::value(names::NUM_EVENTS, self.num_events),
                Element::value(names::VALUE, self.value),
            ],
        )
    }
}

/// `IntradayBarResponse` carrying `barData.barTickData[]`.
#[must_use]
pub fn bar_message(bars: &[Bar]) -> Message {
    Message::new(
        response_type(RequestKind::IntradayBar),
        vec![Element::sequence(
            names::BAR_DATA,
            vec![Element::array(
                names::BAR_TICK_DATA,
                bars.iter().map(Bar::to_element).collect(),
            )],
        )],
    )
}

/// One tick record; `extras` become additional named elements.
#[must_use]
pub fn tick(
    time: DateTime<Utc>,
    event_type: &str,
    value: f64,
    size: i64,
    extras: &[(&str, Value)],
) -> Element {
    let mut children = vec![
        Element::value(names::TIME, time),
        Element::value(names::TYPE, event_type),
        Element::value(names::VALUE, value),
        Element::value(names::SIZE, size),
    ];
    children.extend(
        extras
            .iter()
            .map(|(name, v)| Element::value(*name, v.clone())),
    );
    Element::sequence(names::TICK_DATA, children)
}

/// `IntradayTickResponse` carrying `tickData.tickData[]`.
#[must_use]
pub fn tick_message(ticks: Vec<Element>) -> Message {
    Message::new(
        response_type(RequestKind::IntradayTick),
        vec![Element::sequence(
            names::TICK_DATA,
            vec![Element::array(names::TICK_DATA, ticks)],
        )],
    )
}

fn field_data(fields: &[(&str, Value)]) -> Vec<Element> {
    fields
        .iter()
        .map(|(name, v)| Element::value(*name, v.clone()))
        .collect()
}

fn field_exceptions(missing: &[&str]) -> Element {
    Element::array(
        names::FIELD_EXCEPTIONS,
        missing
            .iter()
            .map(|f| {
                Element::sequence(
                    names::FIELD_EXCEPTIONS,
                    vec![
                        Element::value("fieldId", *f),
                        Element::sequence(
                            "errorInfo",
                            vec![
                                Element::value(names::CATEGORY, "BAD_FLD"),
                                Element::value(names::MESSAGE, "Field not valid"),
                            ],
                        ),
                    ],
                )
            })
            .collect(),
    )
}

fn error_info(name: &str, category: &str, message: &str) -> Element {
    Element::sequence(
        name,
        vec![
            Element::value(names::CATEGORY, category),
            Element::value(names::MESSAGE, message),
        ],
    )
}

/// One `securityData[]` entry of a reference response.
///
/// `missing` lists requested fields the provider reports in `fieldExceptions`.
#[must_use]
pub fn reference_entry(security: &str, fields: &[(&str, Value)], missing: &[&str]) -> Element {
    let mut children = vec![
        Element::value(names::SECURITY, security),
        Element::sequence(names::FIELD_DATA, field_data(fields)),
    ];
    if !missing.is_empty() {
        children.push(field_exceptions(missing));
    }
    Element::sequence(names::SECURITY_DATA, children)
}

/// A `securityData[]` entry that carries a `securityError` envelope.
#[must_use]
pub fn reference_security_error(security: &str, category: &str, message: &str) -> Element {
    Element::sequence(
        names::SECURITY_DATA,
        vec![
            Element::value(names::SECURITY, security),
            error_info(names::SECURITY_ERROR, category, message),
            Element::sequence(names::FIELD_DATA, Vec::new()),
        ],
    )
}

/// `ReferenceDataResponse` carrying `securityData[]`.
#[must_use]
pub fn reference_message(entries: Vec<Element>) -> Message {
    Message::new(
        response_type(RequestKind::ReferenceData),
        vec![Element::array(names::SECURITY_DATA, entries)],
    )
}

/// `HistoricalDataResponse` for one security with one `fieldData[]` entry per date.
#[must_use]
pub fn historical_message(security: &str, rows: &[(NaiveDate, Vec<(&str, Value)>)]) -> Message {
    let dates = rows
        .iter()
        .map(|(date, fields)| {
            let mut children = vec![Element::value(names::DATE, *date)];
            children.extend(field_data(fields));
            Element::sequence(names::FIELD_DATA, children)
        })
        .collect();
    Message::new(
        response_type(RequestKind::HistoricalData),
        vec![Element::sequence(
            names::SECURITY_DATA,
            vec![
                Element::value(names::SECURITY, security),
                Element::array(names::FIELD_DATA, dates),
            ],
        )],
    )
}

/// `HistoricalDataResponse` whose `securityData` carries a `securityError`.
#[must_use]
pub fn historical_security_error(security: &str, category: &str, message: &str) -> Message {
    Message::new(
        response_type(RequestKind::HistoricalData),
        vec![Element::sequence(
            names::SECURITY_DATA,
            vec![
                Element::value(names::SECURITY, security),
                error_info(names::SECURITY_ERROR, category, message),
                Element::array(names::FIELD_DATA, Vec::new()),
            ],
        )],
    )
}

/// A response message carrying a response-level `responseError` envelope.
#[must_use]
pub fn response_error(kind: RequestKind, category: &str, message: &str) -> Message {
    Message::new(
        response_type(kind),
        vec![error_info(names::RESPONSE_ERROR, category, message)],
    )
}

/// A `SessionTerminated` session-status message.
#[must_use]
pub fn session_terminated() -> Message {
    Message::new(names::SESSION_TERMINATED, Vec::new())
}

/// A `PARTIAL_RESPONSE` event.
#[must_use]
pub const fn partial(messages: Vec<Message>) -> Event {
    Event::new(EventKind::PartialResponse, messages)
}

/// A final `RESPONSE` event.
#[must_use]
pub const fn response(messages: Vec<Message>) -> Event {
    Event::new(EventKind::Response, messages)
}

/// A `SESSION_STATUS` event.
#[must_use]
pub const fn session_status(messages: Vec<Message>) -> Event {
    Event::new(EventKind::SessionStatus, messages)
}

/// Split messages into partial events followed by one final event.
///
/// An empty input yields a single empty final event.
#[must_use]
pub fn respond_in_parts(messages: Vec<Message>) -> Vec<Event> {
    let n = messages.len();
    if n == 0 {
        return vec![response(Vec::new())];
    }
    messages
        .into_iter()
        .enumerate()
        .map(|(i, m)| {
            if i + 1 == n {
                response(vec![m])
            } else {
                partial(vec![m])
            }
        })
        .collect()
}
