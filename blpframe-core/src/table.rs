//! Ordered, column-typed row store returned by every entry point.

use core::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{BlpError, Value};

/// One row: composite key values followed by data cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Composite key, one value per [`Table::index_names`] entry.
    pub index: Vec<Value>,
    /// Cells, one per [`Table::columns`] entry.
    pub values: Vec<Value>,
}

/// A flat result table with a composite row key.
///
/// Rows keep insertion order unless [`sort_by_index`](Self::sort_by_index) is
/// called. Absent cells are [`Value::Null`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    index_names: Vec<String>,
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Empty table with the given key and data column names.
    #[must_use]
    pub fn new(index_names: Vec<String>, columns: Vec<String>) -> Self {
        Self {
            index_names,
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row.
    ///
    /// # Errors
    /// Returns `Data` if the key or cell count does not match the schema.
    pub fn push_row(&mut self, index: Vec<Value>, values: Vec<Value>) -> Result<(), BlpError> {
        if index.len() != self.index_names.len() || values.len() != self.columns.len() {
            return Err(BlpError::Data(format!(
                "row shape {}x{} does not match table shape {}x{}",
                index.len(),
                values.len(),
                self.index_names.len(),
                self.columns.len()
            )));
        }
        self.rows.push(Row { index, values });
        Ok(())
    }

    /// Names of the composite key levels, e.g. `["time", "ticker"]`.
    #[must_use]
    pub fn index_names(&self) -> &[String] {
        &self.index_names
    }

    /// Data column names in schema order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in table order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of data columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All cells of a data column, top to bottom.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let pos = self.column_position(name)?;
        Some(self.rows.iter().map(|r| &r.values[pos]).collect())
    }

    /// All values of one key level, top to bottom.
    #[must_use]
    pub fn index_level(&self, name: &str) -> Option<Vec<&Value>> {
        let pos = self.index_names.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|r| &r.index[pos]).collect())
    }

    /// Cell at `row`, `column`.
    #[must_use]
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let pos = self.column_position(column)?;
        self.rows.get(row).map(|r| &r.values[pos])
    }

    /// Composite key of `row`.
    #[must_use]
    pub fn row_index(&self, row: usize) -> Option<&[Value]> {
        self.rows.get(row).map(|r| r.index.as_slice())
    }

    /// Type label shared by every non-null cell of a column.
    ///
    /// Returns `"null"` for an all-null column and `"mixed"` when types
    /// differ; a mix of `int` and `float` widens to `float`.
    #[must_use]
    pub fn column_type(&self, name: &str) -> Option<&'static str> {
        let pos = self.column_position(name)?;
        Some(infer_type(self.rows.iter().map(|r| &r.values[pos])))
    }

    /// Type label of one key level; see [`column_type`](Self::column_type).
    #[must_use]
    pub fn index_type(&self, name: &str) -> Option<&'static str> {
        let pos = self.index_names.iter().position(|c| c == name)?;
        Some(infer_type(self.rows.iter().map(|r| &r.index[pos])))
    }

    /// Concatenate tables top to bottom, preserving each table's row order.
    ///
    /// The resulting columns are the union of the inputs' columns in
    /// first-seen order; cells a table does not have are `Null`.
    ///
    /// # Errors
    /// Returns `Data` if the inputs have different key levels.
    pub fn concat(tables: Vec<Self>) -> Result<Self, BlpError> {
        let mut iter = tables.into_iter();
        let Some(first) = iter.next() else {
            return Ok(Self::default());
        };
        let rest: Vec<Self> = iter.collect();

        let mut columns = first.columns.clone();
        for t in &rest {
            if t.index_names != first.index_names {
                return Err(BlpError::Data(format!(
                    "cannot concatenate tables keyed by {:?} and {:?}",
                    first.index_names, t.index_names
                )));
            }
            for c in &t.columns {
                if !columns.contains(c) {
                    columns.push(c.clone());
                }
            }
        }

        let mut out = Self::new(first.index_names.clone(), columns);
        for t in core::iter::once(first).chain(rest) {
            let map: Vec<Option<usize>> = out
                .columns
                .iter()
                .map(|c| t.column_position(c))
                .collect();
            for row in t.rows {
                let mut values = row.values;
                let cells = map
                    .iter()
                    .map(|slot| {
                        slot.map_or(Value::Null, |i| core::mem::take(&mut values[i]))
                    })
                    .collect();
                out.rows.push(Row {
                    index: row.index,
                    values: cells,
                });
            }
        }
        Ok(out)
    }

    /// Stable sort of the rows by their composite key.
    pub fn sort_by_index(&mut self) {
        self.rows.sort_by(|a, b| {
            a.index
                .iter()
                .zip(&b.index)
                .map(|(x, y)| compare_values(x, y))
                .find(|o| *o != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });
    }
}

fn infer_type<'a>(cells: impl Iterator<Item = &'a Value>) -> &'static str {
    let mut seen: Option<&'static str> = None;
    for v in cells.filter(|v| !v.is_null()) {
        let t = v.type_name();
        seen = match seen {
            None => Some(t),
            Some(prev) if prev == t => Some(prev),
            Some("int" | "float") if matches!(t, "int" | "float") => Some("float"),
            Some(_) => return "mixed",
        };
    }
    seen.unwrap_or("null")
}

/// Total order used for key sorting: `Null` first, then by type, then by value.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Int(_) | Value::Float(_) => 2,
            Value::String(_) => 3,
            Value::Date(_) => 4,
            Value::Datetime(_) => 5,
        }
    }
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Int(x), Value::Int(y)) => x.cmp(y),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Date(x), Value::Date(y)) => x.cmp(y),
        (Value::Datetime(x), Value::Datetime(y)) => x.cmp(y),
        (x, y) if rank(x) == 2 && rank(y) == 2 => {
            let (fx, fy) = (x.as_f64().unwrap_or(f64::NAN), y.as_f64().unwrap_or(f64::NAN));
            fx.total_cmp(&fy)
        }
        (x, y) => rank(x).cmp(&rank(y)),
    }
}
