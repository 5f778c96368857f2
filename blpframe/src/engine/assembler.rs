//! Turn a finished record store into the caller-facing [`Table`].

use blpframe_core::{BlpError, RequestSpec, Table, Value, names};

use super::store::RecordStore;

/// Data columns of an intraday bar table.
pub const BAR_COLUMNS: [&str; 7] = [
    names::OPEN,
    names::HIGH,
    names::LOW,
    names::CLOSE,
    names::VOLUME,
    names::NUM_EVENTS,
    names::VALUE,
];

/// Leading data columns of an intraday tick table.
pub const TICK_COLUMNS: [&str; 3] = [names::TYPE, names::VALUE, names::SIZE];

/// Key level holding the ticker.
pub const TICKER: &str = "ticker";

fn owned(cols: &[&str]) -> Vec<String> {
    cols.iter().map(|c| (*c).to_string()).collect()
}

fn cells(values: Vec<Value>) -> Vec<Value> {
    values.into_iter().map(Value::normalized).collect()
}

/// Position of `security` in the requested list; unknown tickers sort last.
fn requested_rank(requested: &[&str], security: &str) -> usize {
    requested
        .iter()
        .position(|s| *s == security)
        .unwrap_or(usize::MAX)
}

/// Build the result table of one session execution.
///
/// Bar and tick tables are keyed by `(time, ticker)`, historical tables by
/// `(date, ticker)`, and reference tables by `ticker`. Rows of several
/// securities follow the requested security order, each block in arrival
/// order.
///
/// # Errors
/// Returns `Data` if the store does not match the request kind of `spec`.
pub fn assemble(
    store: RecordStore,
    spec: &RequestSpec,
    extra_columns: &[String],
) -> Result<Table, BlpError> {
    let requested = spec.securities();
    match (store, spec) {
        (RecordStore::Bars(rows), RequestSpec::IntradayBar(s)) => {
            let mut table = Table::new(
                vec![names::TIME.to_string(), TICKER.to_string()],
                owned(&BAR_COLUMNS),
            );
            for (time, values) in rows.into_rows() {
                table.push_row(
                    vec![Value::Datetime(time), Value::from(s.security.as_str())],
                    cells(values),
                )?;
            }
            Ok(table)
        }
        (RecordStore::Ticks(rows), RequestSpec::IntradayTick(s)) => {
            let mut columns = owned(&TICK_COLUMNS);
            columns.extend(extra_columns.iter().cloned());
            let mut table =
                Table::new(vec![names::TIME.to_string(), TICKER.to_string()], columns);
            for (time, values) in rows.into_rows() {
                table.push_row(
                    vec![Value::Datetime(time), Value::from(s.security.as_str())],
                    cells(values),
                )?;
            }
            Ok(table)
        }
        (RecordStore::Reference(rows), RequestSpec::ReferenceData(s)) => {
            let mut table = Table::new(vec![TICKER.to_string()], s.fields.as_slice().to_vec());
            let mut ordered = rows.into_rows();
            ordered.sort_by_key(|(security, _)| requested_rank(&requested, security));
            for (security, values) in ordered {
                table.push_row(vec![Value::from(security)], cells(values))?;
            }
            Ok(table)
        }
        (RecordStore::Historical(hist), RequestSpec::HistoricalData(s)) => {
            let mut sets = hist.into_sets();
            sets.sort_by_key(|(security, _)| requested_rank(&requested, security));
            let mut table = Table::new(
                vec![names::DATE.to_string(), TICKER.to_string()],
                s.fields.as_slice().to_vec(),
            );
            for (security, rows) in sets {
                for (date, values) in rows.into_rows() {
                    table.push_row(
                        vec![Value::Date(date), Value::from(security.as_str())],
                        cells(values),
                    )?;
                }
            }
            Ok(table)
        }
        (_, spec) => Err(BlpError::Data(format!(
            "record store does not match a {} request",
            spec.kind()
        ))),
    }
}
