//! Canned market data keyed by ticker.

use blpframe_core::Value;
use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};

/// Reference snapshot for a known ticker: `(field, value)` pairs.
#[must_use]
pub fn reference(security: &str) -> Option<Vec<(&'static str, Value)>> {
    let (name, crncy, px, volume) = match security {
        "AAPL US Equity" => ("APPLE INC", "USD", 189.84, 48_000_000_i64),
        "IBM US Equity" => ("INTL BUSINESS MACHINES CORP", "USD", 168.2, 3_100_000),
        "MSFT US Equity" => ("MICROSOFT CORP", "USD", 415.5, 17_600_000),
        "VOD LN Equity" => ("VODAFONE GROUP PLC", "GBp", 71.3, 52_000_000),
        _ => return None,
    };
    Some(vec![
        ("NAME", Value::from(name)),
        ("CRNCY", Value::from(crncy)),
        ("PX_LAST", Value::from(px)),
        ("VOLUME", Value::from(volume)),
    ])
}

/// Returns true if historical and reference fixtures know this ticker.
#[must_use]
pub fn is_known(security: &str) -> bool {
    reference(security).is_some()
}

fn base_price(security: &str) -> f64 {
    let seed: u32 = security.bytes().map(u32::from).sum();
    f64::from(seed % 200) + 50.0
}

/// Daily history fields for a known ticker on a trading day.
///
/// Weekends yield `None`. Unsupported fields are left out.
#[must_use]
pub fn daily(security: &str, date: NaiveDate, fields: &[&str]) -> Option<Vec<(String, Value)>> {
    if !is_known(security) || matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        return None;
    }
    let drift = f64::from(date.ordinal() % 17) * 0.25;
    let close = base_price(security) + drift;
    let row = fields
        .iter()
        .filter_map(|f| {
            let v = match *f {
                "PX_OPEN" => Value::from(close - 0.5),
                "PX_HIGH" => Value::from(close + 1.0),
                "PX_LOW" => Value::from(close - 1.0),
                "PX_LAST" => Value::from(close),
                "VOLUME" => Value::from(1_000_000 + i64::from(date.ordinal()) * 1_000),
                _ => return None,
            };
            Some(((*f).to_string(), v))
        })
        .collect();
    Some(row)
}

/// Intraday price of a ticker at `time`.
#[must_use]
pub fn intraday_price(security: &str, time: DateTime<Utc>) -> f64 {
    let minutes = (time.timestamp() / 60).rem_euclid(97);
    base_price(security) + (minutes as f64) * 0.01
}
