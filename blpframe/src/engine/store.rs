//! Per-execution accumulator of raw rows, keyed by their natural row key.

use std::collections::HashMap;
use std::hash::Hash;

use blpframe_core::{DuplicateKeys, Value};
use chrono::{DateTime, NaiveDate, Utc};

/// Rows in first-seen key order.
///
/// With [`DuplicateKeys::LastWriteWins`] a repeated key replaces the earlier
/// row's cells in place; with [`DuplicateKeys::KeepAll`] it appends a new row.
#[derive(Debug, Clone)]
pub struct KeyedRows<K> {
    rows: Vec<(K, Vec<Value>)>,
    positions: HashMap<K, usize>,
    policy: DuplicateKeys,
    overwritten: usize,
}

impl<K: Eq + Hash + Clone> KeyedRows<K> {
    pub fn new(policy: DuplicateKeys) -> Self {
        Self {
            rows: Vec::new(),
            positions: HashMap::new(),
            policy,
            overwritten: 0,
        }
    }

    pub fn insert(&mut self, key: K, values: Vec<Value>) {
        if self.policy == DuplicateKeys::LastWriteWins {
            if let Some(&pos) = self.positions.get(&key) {
                self.rows[pos].1 = values;
                self.overwritten += 1;
                return;
            }
            self.positions.insert(key.clone(), self.rows.len());
        }
        self.rows.push((key, values));
    }

    /// Number of rows whose cells were replaced by a later duplicate.
    pub const fn overwritten(&self) -> usize {
        self.overwritten
    }

    #[cfg(any(test, feature = "tracing"))]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = (&K, &[Value])> {
        self.rows.iter().map(|(k, v)| (k, v.as_slice()))
    }

    pub fn into_rows(self) -> Vec<(K, Vec<Value>)> {
        self.rows
    }
}

/// Per-security history rows in first-seen security order.
#[derive(Debug, Clone)]
pub struct HistoricalRows {
    policy: DuplicateKeys,
    sets: Vec<(String, KeyedRows<NaiveDate>)>,
}

impl HistoricalRows {
    pub const fn new(policy: DuplicateKeys) -> Self {
        Self {
            policy,
            sets: Vec::new(),
        }
    }

    /// Rows for `security`, creating an empty set if it is new.
    pub fn for_security(&mut self, security: &str) -> &mut KeyedRows<NaiveDate> {
        let pos = match self.sets.iter().position(|(s, _)| s == security) {
            Some(p) => p,
            None => {
                self.sets
                    .push((security.to_string(), KeyedRows::new(self.policy)));
                self.sets.len() - 1
            }
        };
        &mut self.sets[pos].1
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &KeyedRows<NaiveDate>)> {
        self.sets.iter().map(|(s, r)| (s.as_str(), r))
    }

    pub fn into_sets(self) -> Vec<(String, KeyedRows<NaiveDate>)> {
        self.sets
    }
}

/// Accumulated rows of one event-loop execution, by request kind.
#[derive(Debug, Clone)]
pub enum RecordStore {
    /// Bars keyed by bar time.
    Bars(KeyedRows<DateTime<Utc>>),
    /// Ticks keyed by tick time.
    Ticks(KeyedRows<DateTime<Utc>>),
    /// Reference rows keyed by ticker.
    Reference(KeyedRows<String>),
    /// History keyed by date, nested under ticker.
    Historical(HistoricalRows),
}

impl RecordStore {
    /// Total number of stored rows.
    #[cfg(any(test, feature = "tracing"))]
    pub fn len(&self) -> usize {
        match self {
            Self::Bars(rows) | Self::Ticks(rows) => rows.len(),
            Self::Reference(rows) => rows.len(),
            Self::Historical(h) => h.iter().map(|(_, r)| r.len()).sum(),
        }
    }

    /// Total number of duplicate-key overwrites.
    pub fn overwritten(&self) -> usize {
        match self {
            Self::Bars(rows) | Self::Ticks(rows) => rows.overwritten(),
            Self::Reference(rows) => rows.overwritten(),
            Self::Historical(h) => h.iter().map(|(_, r)| r.overwritten()).sum(),
        }
    }
}
