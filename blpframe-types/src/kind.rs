use core::fmt;
use serde::{Deserialize, Serialize};

/// The four request kinds the adapter can issue.
///
/// One tag is carried through a whole call: it selects the request operation,
/// the response processor, and the table schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestKind {
    /// Intraday OHLC bars for one security and event type.
    IntradayBar,
    /// Raw intraday ticks for one security and a set of event types.
    IntradayTick,
    /// Point-in-time field values for a list of securities.
    ReferenceData,
    /// Daily field history for a list of securities.
    HistoricalData,
}

impl RequestKind {
    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IntradayBar => "intraday-bar",
            Self::IntradayTick => "intraday-tick",
            Self::ReferenceData => "reference-data",
            Self::HistoricalData => "historical-data",
        }
    }

    /// Provider operation name used to create the request.
    #[must_use]
    pub const fn operation(self) -> &'static str {
        match self {
            Self::IntradayBar => "IntradayBarRequest",
            Self::IntradayTick => "IntradayTickRequest",
            Self::ReferenceData => "ReferenceDataRequest",
            Self::HistoricalData => "HistoricalDataRequest",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
