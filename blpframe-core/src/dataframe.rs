//! Conversion of a [`Table`] into a polars `DataFrame`.

use chrono::{DateTime, NaiveDate};
use polars::prelude::{Column, DataFrame, DataType, PlSmallStr, TimeUnit, TimeZone};

use crate::{BlpError, Table, Value};

fn polars_err(e: &polars::prelude::PolarsError) -> BlpError {
    BlpError::Data(format!("dataframe conversion failed: {e}"))
}

fn epoch() -> NaiveDate {
    DateTime::UNIX_EPOCH.date_naive()
}

fn build_column(name: &str, kind: &str, cells: &[&Value]) -> Result<Column, BlpError> {
    let name = PlSmallStr::from(name);
    let column = match kind {
        "bool" => Column::new(name, cells.iter().map(|v| v.as_bool()).collect::<Vec<_>>()),
        "int" => Column::new(name, cells.iter().map(|v| v.as_i64()).collect::<Vec<_>>()),
        "float" => Column::new(name, cells.iter().map(|v| v.as_f64()).collect::<Vec<_>>()),
        "date" => {
            let days: Vec<Option<i32>> = cells
                .iter()
                .map(|v| {
                    v.as_date()
                        .and_then(|d| i32::try_from((d - epoch()).num_days()).ok())
                })
                .collect();
            Column::new(name, days)
                .cast(&DataType::Date)
                .map_err(|e| polars_err(&e))?
        }
        "datetime" => {
            let millis: Vec<Option<i64>> = cells
                .iter()
                .map(|v| v.as_datetime().map(|ts| ts.timestamp_millis()))
                .collect();
            Column::new(name, millis)
                .cast(&DataType::Datetime(
                    TimeUnit::Milliseconds,
                    Some(TimeZone::UTC),
                ))
                .map_err(|e| polars_err(&e))?
        }
        "string" => Column::new(
            name,
            cells
                .iter()
                .map(|v| v.as_str().map(ToString::to_string))
                .collect::<Vec<_>>(),
        ),
        // all-null or mixed columns fall back to text
        _ => Column::new(
            name,
            cells
                .iter()
                .map(|v| (!v.is_null()).then(|| v.to_string()))
                .collect::<Vec<_>>(),
        ),
    };
    Ok(column)
}

impl Table {
    /// Convert to a `DataFrame` with the key levels as leading columns.
    ///
    /// Column dtypes follow [`Table::column_type`]; all-null and mixed
    /// columns become strings.
    ///
    /// # Errors
    /// Returns `Data` if polars rejects a column.
    pub fn to_dataframe(&self) -> Result<DataFrame, BlpError> {
        let mut columns = Vec::with_capacity(self.index_names().len() + self.width());
        for name in self.index_names() {
            let cells = self.index_level(name).unwrap_or_default();
            let kind = self.index_type(name).unwrap_or("null");
            columns.push(build_column(name, kind, &cells)?);
        }
        for name in self.columns() {
            let cells = self.column(name).unwrap_or_default();
            let kind = self.column_type(name).unwrap_or("null");
            columns.push(build_column(name, kind, &cells)?);
        }
        DataFrame::new(columns).map_err(|e| polars_err(&e))
    }
}
