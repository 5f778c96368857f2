//! Per-kind message processing into the record store.

use blpframe_core::{
    BlpError, Element, Message, RequestKind, RequestSpec, ResponseError, Value, names,
};

use super::request_builder::tick_extra_columns;
use super::store::RecordStore;

/// Response-level `responseError` envelope of a message, if any.
#[must_use]
pub fn response_error(msg: &Message) -> Option<ResponseError> {
    msg.get_element(names::RESPONSE_ERROR).ok().map(envelope)
}

fn envelope(info: &Element) -> ResponseError {
    let category = info
        .get_element_as_string(names::CATEGORY)
        .unwrap_or_else(|_| "UNKNOWN".to_string());
    let message = info
        .get_element_as_string(names::MESSAGE)
        .unwrap_or_default();
    ResponseError::new(category, message)
}

fn security_error(entry: &Element, security: &str) -> Option<ResponseError> {
    let info = entry.get_element(names::SECURITY_ERROR).ok()?;
    Some(envelope(info).for_security(security))
}

/// A field cell: scalars are copied (NaN becomes null), absent fields are null.
fn field_cell(parent: &Element, field: &str) -> Result<Value, BlpError> {
    if !parent.has_element(field) {
        return Ok(Value::Null);
    }
    let child = parent.get_element(field)?;
    child
        .get_value()
        .cloned()
        .map(Value::normalized)
        .ok_or_else(|| {
            BlpError::Data(format!(
                "field '{field}' is not a scalar; bulk fields are not supported"
            ))
        })
}

fn field_cells(parent: Option<&Element>, fields: &[String]) -> Result<Vec<Value>, BlpError> {
    fields
        .iter()
        .map(|f| parent.map_or(Ok(Value::Null), |p| field_cell(p, f)))
        .collect()
}

fn store_mismatch(kind: RequestKind) -> BlpError {
    BlpError::Data(format!("record store does not hold {kind} rows"))
}

/// Message schema of one request kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseProcessor {
    IntradayBar,
    IntradayTick { extra_columns: Vec<String> },
    ReferenceData { fields: Vec<String> },
    HistoricalData { fields: Vec<String> },
}

impl ResponseProcessor {
    pub fn for_spec(spec: &RequestSpec) -> Self {
        match spec {
            RequestSpec::IntradayBar(_) => Self::IntradayBar,
            RequestSpec::IntradayTick(s) => Self::IntradayTick {
                extra_columns: tick_extra_columns(s.include_condition_codes, &s.extra),
            },
            RequestSpec::ReferenceData(s) => Self::ReferenceData {
                fields: s.fields.as_slice().to_vec(),
            },
            RequestSpec::HistoricalData(s) => Self::HistoricalData {
                fields: s.fields.as_slice().to_vec(),
            },
        }
    }

    pub const fn kind(&self) -> RequestKind {
        match self {
            Self::IntradayBar => RequestKind::IntradayBar,
            Self::IntradayTick { .. } => RequestKind::IntradayTick,
            Self::ReferenceData { .. } => RequestKind::ReferenceData,
            Self::HistoricalData { .. } => RequestKind::HistoricalData,
        }
    }

    /// Tick columns beyond `type`, `value`, `size`; empty for other kinds.
    pub fn extra_columns(&self) -> &[String] {
        match self {
            Self::IntradayTick { extra_columns } => extra_columns,
            _ => &[],
        }
    }

    /// Consume one response message.
    ///
    /// Per-security error envelopes are pushed to `errors` and their entries
    /// skipped. A message without the kind's mandatory elements is a `Data`
    /// error.
    pub fn process(
        &self,
        msg: &Message,
        store: &mut RecordStore,
        errors: &mut Vec<ResponseError>,
    ) -> Result<(), BlpError> {
        match (self, store) {
            (Self::IntradayBar, RecordStore::Bars(rows)) => {
                let bars = msg
                    .get_element(names::BAR_DATA)?
                    .get_element(names::BAR_TICK_DATA)?;
                for bar in bars.values() {
                    let time = bar.get_element_as_datetime(names::TIME)?;
                    let cells: Vec<Value> = vec![
                        bar.get_element_as_float(names::OPEN)?.into(),
                        bar.get_element_as_float(names::HIGH)?.into(),
                        bar.get_element_as_float(names::LOW)?.into(),
                        bar.get_element_as_float(names::CLOSE)?.into(),
                        bar.get_element_as_integer(names::VOLUME)?.into(),
                        bar.get_element_as_integer(names::NUM_EVENTS)?.into(),
                        bar.get_element_as_integer(names::VALUE)?.into(),
                    ];
                    rows.insert(time, cells.into_iter().map(Value::normalized).collect());
                }
                Ok(())
            }
            (Self::IntradayTick { extra_columns }, RecordStore::Ticks(rows)) => {
                let ticks = msg
                    .get_element(names::TICK_DATA)?
                    .get_element(names::TICK_DATA)?;
                for tick in ticks.values() {
                    let time = tick.get_element_as_datetime(names::TIME)?;
                    let mut cells = vec![
                        Value::from(tick.get_element_as_string(names::TYPE)?),
                        Value::from(tick.get_element_as_float(names::VALUE)?).normalized(),
                        Value::from(tick.get_element_as_integer(names::SIZE)?),
                    ];
                    for col in extra_columns {
                        cells.push(field_cell(tick, col)?);
                    }
                    rows.insert(time, cells);
                }
                Ok(())
            }
            (Self::ReferenceData { fields }, RecordStore::Reference(rows)) => {
                for entry in msg.get_element(names::SECURITY_DATA)?.values() {
                    let security = entry.get_element_as_string(names::SECURITY)?;
                    if let Some(err) = security_error(entry, &security) {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(
                            security = %security,
                            error = %err,
                            "security error in reference response"
                        );
                        errors.push(err);
                        continue;
                    }
                    let data = entry.get_element(names::FIELD_DATA).ok();
                    let cells = field_cells(data, fields)?;
                    rows.insert(security, cells);
                }
                Ok(())
            }
            (Self::HistoricalData { fields }, RecordStore::Historical(hist)) => {
                let data = msg.get_element(names::SECURITY_DATA)?;
                let security = data.get_element_as_string(names::SECURITY)?;
                if let Some(err) = security_error(data, &security) {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        security = %security,
                        error = %err,
                        "security error in historical response"
                    );
                    errors.push(err);
                    return Ok(());
                }
                let rows = hist.for_security(&security);
                let Ok(days) = data.get_element(names::FIELD_DATA) else {
                    return Ok(());
                };
                for day in days.values() {
                    let date = day
                        .get_element(names::DATE)?
                        .get_value()
                        .and_then(Value::as_date)
                        .ok_or_else(|| {
                            BlpError::Data(format!("'{}' entry without a date", names::FIELD_DATA))
                        })?;
                    rows.insert(date, field_cells(Some(day), fields)?);
                }
                Ok(())
            }
            _ => Err(store_mismatch(self.kind())),
        }
    }
}
