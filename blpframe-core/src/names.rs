//! Well-known element and message names of the reference-data service.

/// Bars container of an intraday bar response.
pub const BAR_DATA: &str = "barData";
/// Repeated bar records inside [`BAR_DATA`].
pub const BAR_TICK_DATA: &str = "barTickData";
/// Ticks container of an intraday tick response; the repeated records share the name.
pub const TICK_DATA: &str = "tickData";
/// Per-security data (array for reference data, single sequence for history).
pub const SECURITY_DATA: &str = "securityData";
/// Requested field values of one security or one date.
pub const FIELD_DATA: &str = "fieldData";
/// Ticker of a `securityData` entry.
pub const SECURITY: &str = "security";
/// Per-security error envelope.
pub const SECURITY_ERROR: &str = "securityError";
/// Per-field errors of a `securityData` entry.
pub const FIELD_EXCEPTIONS: &str = "fieldExceptions";
/// Response-level error envelope.
pub const RESPONSE_ERROR: &str = "responseError";
/// Error category inside an envelope.
pub const CATEGORY: &str = "category";
/// Error message inside an envelope.
pub const MESSAGE: &str = "message";
/// Session-status message type signalling termination.
pub const SESSION_TERMINATED: &str = "SessionTerminated";

/// Row timestamp of a bar or tick.
pub const TIME: &str = "time";
/// Row date of a historical record.
pub const DATE: &str = "date";
/// Bar open.
pub const OPEN: &str = "open";
/// Bar high.
pub const HIGH: &str = "high";
/// Bar low.
pub const LOW: &str = "low";
/// Bar close.
pub const CLOSE: &str = "close";
/// Bar volume.
pub const VOLUME: &str = "volume";
/// Number of events in a bar.
pub const NUM_EVENTS: &str = "numEvents";
/// Bar traded value, or tick price.
pub const VALUE: &str = "value";
/// Tick event type.
pub const TYPE: &str = "type";
/// Tick size.
pub const SIZE: &str = "size";
/// Tick condition codes.
pub const CONDITION_CODES: &str = "conditionCodes";

/// Request: single security.
pub const REQ_SECURITY: &str = "security";
/// Request: repeated securities.
pub const REQ_SECURITIES: &str = "securities";
/// Request: repeated fields.
pub const REQ_FIELDS: &str = "fields";
/// Request: bar event type.
pub const REQ_EVENT_TYPE: &str = "eventType";
/// Request: repeated tick event types.
pub const REQ_EVENT_TYPES: &str = "eventTypes";
/// Request: bar interval in minutes.
pub const REQ_INTERVAL: &str = "interval";
/// Request: intraday window start.
pub const REQ_START_DATE_TIME: &str = "startDateTime";
/// Request: intraday window end.
pub const REQ_END_DATE_TIME: &str = "endDateTime";
/// Request: historical window start (`YYYYMMDD`).
pub const REQ_START_DATE: &str = "startDate";
/// Request: historical window end (`YYYYMMDD`).
pub const REQ_END_DATE: &str = "endDate";
/// Request: tick condition codes flag.
pub const REQ_INCLUDE_CONDITION_CODES: &str = "includeConditionCodes";
/// Request: repeated override entries.
pub const REQ_OVERRIDES: &str = "overrides";
/// Override entry: field id.
pub const REQ_FIELD_ID: &str = "fieldId";
/// Override entry: value.
pub const REQ_VALUE: &str = "value";
