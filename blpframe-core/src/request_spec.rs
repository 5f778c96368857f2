//! Immutable descriptions of one outbound request.
//!
//! A [`RequestSpec`] is built once per call (after argument validation) and
//! carried through request construction, response processing, and table
//! assembly as a single tagged value.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{Params, RequestKind};

macro_rules! string_list {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Vec<String>);

        impl $name {
            /// Items in caller order.
            #[must_use]
            pub fn as_slice(&self) -> &[String] {
                &self.0
            }

            /// Number of items.
            #[must_use]
            pub fn len(&self) -> usize {
                self.0.len()
            }

            /// Returns true if there are no items.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Iterate in caller order.
            pub fn iter(&self) -> impl Iterator<Item = &str> {
                self.0.iter().map(String::as_str)
            }
        }

        impl From<&str> for $name {
            fn from(v: &str) -> Self {
                Self(vec![v.to_string()])
            }
        }

        impl From<String> for $name {
            fn from(v: String) -> Self {
                Self(vec![v])
            }
        }

        impl From<Vec<String>> for $name {
            fn from(v: Vec<String>) -> Self {
                Self(v)
            }
        }

        impl From<Vec<&str>> for $name {
            fn from(v: Vec<&str>) -> Self {
                Self(v.into_iter().map(str::to_string).collect())
            }
        }

        impl From<&[&str]> for $name {
            fn from(v: &[&str]) -> Self {
                Self(v.iter().map(|s| (*s).to_string()).collect())
            }
        }

        impl From<&[String]> for $name {
            fn from(v: &[String]) -> Self {
                Self(v.to_vec())
            }
        }

        impl<const N: usize> From<[&str; N]> for $name {
            fn from(v: [&str; N]) -> Self {
                Self(v.iter().map(|s| (*s).to_string()).collect())
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a String;
            type IntoIter = core::slice::Iter<'a, String>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }
    };
}

string_list!(
    /// One or more tickers; a single string is accepted wherever a list is.
    Securities
);
string_list!(
    /// One or more field mnemonics or event types.
    Fields
);

/// Intraday bar request for a single security.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntradayBarSpec {
    /// Ticker.
    pub security: String,
    /// Event the bars are built from, e.g. `TRADE` or `BID`.
    pub event_type: String,
    /// Window start.
    pub start: DateTime<Utc>,
    /// Window end.
    pub end: DateTime<Utc>,
    /// Bar length in minutes (>= 1).
    pub interval: u32,
    /// Extra request parameters set verbatim.
    pub extra: Params,
}

/// Intraday tick request for a single security.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntradayTickSpec {
    /// Ticker.
    pub security: String,
    /// Tick event types, e.g. `TRADE`, `BID`, `ASK`.
    pub event_types: Fields,
    /// Window start.
    pub start: DateTime<Utc>,
    /// Window end.
    pub end: DateTime<Utc>,
    /// Request and return condition codes.
    pub include_condition_codes: bool,
    /// Extra request parameters set verbatim.
    pub extra: Params,
}

/// Reference (current value) request for one or more securities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceDataSpec {
    /// Tickers.
    pub securities: Securities,
    /// Field mnemonics; also the output column order.
    pub fields: Fields,
    /// Field overrides, `fieldId -> value`.
    pub overrides: Params,
    /// Extra request parameters set verbatim.
    pub extra: Params,
}

/// Daily history request for one or more securities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalDataSpec {
    /// Tickers.
    pub securities: Securities,
    /// Field mnemonics; also the output column order.
    pub fields: Fields,
    /// First date (inclusive).
    pub start: NaiveDate,
    /// Last date (inclusive).
    pub end: NaiveDate,
    /// Field overrides, `fieldId -> value`.
    pub overrides: Params,
    /// Extra request parameters set verbatim.
    pub extra: Params,
}

/// One outbound request, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RequestSpec {
    /// Intraday bars.
    IntradayBar(IntradayBarSpec),
    /// Intraday ticks.
    IntradayTick(IntradayTickSpec),
    /// Reference data.
    ReferenceData(ReferenceDataSpec),
    /// Historical data.
    HistoricalData(HistoricalDataSpec),
}

impl RequestSpec {
    /// Kind tag carried through the whole call.
    #[must_use]
    pub const fn kind(&self) -> RequestKind {
        match self {
            Self::IntradayBar(_) => RequestKind::IntradayBar,
            Self::IntradayTick(_) => RequestKind::IntradayTick,
            Self::ReferenceData(_) => RequestKind::ReferenceData,
            Self::HistoricalData(_) => RequestKind::HistoricalData,
        }
    }

    /// Securities addressed by this request, in caller order.
    #[must_use]
    pub fn securities(&self) -> Vec<&str> {
        match self {
            Self::IntradayBar(s) => vec![s.security.as_str()],
            Self::IntradayTick(s) => vec![s.security.as_str()],
            Self::ReferenceData(s) => s.securities.iter().collect(),
            Self::HistoricalData(s) => s.securities.iter().collect(),
        }
    }

    /// Extra request parameters.
    #[must_use]
    pub const fn extra_params(&self) -> &Params {
        match self {
            Self::IntradayBar(s) => &s.extra,
            Self::IntradayTick(s) => &s.extra,
            Self::ReferenceData(s) => &s.extra,
            Self::HistoricalData(s) => &s.extra,
        }
    }

    /// Field overrides; `None` for kinds that do not accept them.
    #[must_use]
    pub const fn overrides(&self) -> Option<&Params> {
        match self {
            Self::ReferenceData(s) => Some(&s.overrides),
            Self::HistoricalData(s) => Some(&s.overrides),
            Self::IntradayBar(_) | Self::IntradayTick(_) => None,
        }
    }
}
