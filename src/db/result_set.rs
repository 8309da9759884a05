//! Owned, cursor-like query results.
//!
//! A `ResultSet` is fully materialised when the query runs, so it does not
//! borrow the session that produced it and can outlive it.

use rusqlite::types::ValueRef;
use rusqlite::{Params, Statement};
use serde::Serialize;
use std::fmt;

/// A single SQL value, detached from the connection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl From<ValueRef<'_>> for SqlValue {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => SqlValue::Null,
            ValueRef::Integer(i) => SqlValue::Integer(i),
            ValueRef::Real(f) => SqlValue::Real(f),
            ValueRef::Text(t) => SqlValue::Text(String::from_utf8_lossy(t).into_owned()),
            ValueRef::Blob(b) => SqlValue::Blob(b.to_vec()),
        }
    }
}

impl SqlValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SqlValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SqlValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => f.write_str("NULL"),
            SqlValue::Integer(i) => write!(f, "{i}"),
            SqlValue::Real(r) => write!(f, "{r}"),
            SqlValue::Text(s) => f.write_str(s),
            SqlValue::Blob(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    columns: Vec<String>,
    rows: Vec<Vec<SqlValue>>,
    cursor: Option<usize>,
}

/// Borrowed view of one row.
#[derive(Debug, Clone, Copy)]
pub struct RowRef<'a> {
    columns: &'a [String],
    values: &'a [SqlValue],
}

impl<'a> RowRef<'a> {
    pub fn get(&self, idx: usize) -> Option<&'a SqlValue> {
        self.values.get(idx)
    }

    /// Value of the column named `name` (case-insensitive, like SQL identifiers).
    pub fn get_by_name(&self, name: &str) -> Option<&'a SqlValue> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
            .and_then(|i| self.values.get(i))
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get_by_name(name).and_then(SqlValue::as_i64)
    }

    pub fn get_str(&self, name: &str) -> Option<&'a str> {
        self.get_by_name(name).and_then(SqlValue::as_str)
    }

    pub fn values(&self) -> &'a [SqlValue] {
        self.values
    }
}

impl ResultSet {
    /// Run a prepared, row-returning statement and collect every row.
    pub(crate) fn collect<P: Params>(
        stmt: &mut Statement<'_>,
        params: P,
    ) -> rusqlite::Result<Self> {
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let mut rows = stmt.query(params)?;
        let mut data = Vec::new();
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(columns.len());
            for i in 0..columns.len() {
                values.push(SqlValue::from(row.get_ref(i)?));
            }
            data.push(values);
        }

        Ok(Self {
            columns,
            rows: data,
            cursor: None,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, idx: usize) -> Option<RowRef<'_>> {
        self.rows.get(idx).map(|values| RowRef {
            columns: &self.columns,
            values,
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = RowRef<'_>> {
        self.rows.iter().map(|values| RowRef {
            columns: &self.columns,
            values,
        })
    }

    /// Move the cursor to the next row. Returns `false` once past the last row.
    pub fn advance(&mut self) -> bool {
        let next = self.cursor.map_or(0, |c| c + 1);
        if next < self.rows.len() {
            self.cursor = Some(next);
            true
        } else {
            self.cursor = Some(self.rows.len());
            false
        }
    }

    /// Row under the cursor; `None` before the first `advance()` and after the last row.
    pub fn current(&self) -> Option<RowRef<'_>> {
        self.cursor.and_then(|c| self.row(c))
    }

    /// Rewind the cursor to before the first row.
    pub fn reset(&mut self) {
        self.cursor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResultSet {
        ResultSet {
            columns: vec!["ID".into(), "name".into()],
            rows: vec![
                vec![SqlValue::Integer(1), SqlValue::Text("Ada".into())],
                vec![SqlValue::Integer(2), SqlValue::Null],
            ],
            cursor: None,
        }
    }

    #[test]
    fn cursor_walks_rows_then_stops() {
        let mut rs = sample();
        assert!(rs.current().is_none());

        assert!(rs.advance());
        assert_eq!(rs.current().unwrap().get_i64("id"), Some(1));
        assert!(rs.advance());
        assert!(rs.current().unwrap().get_by_name("NAME").unwrap().is_null());
        assert!(!rs.advance());
        assert!(rs.current().is_none());
        assert!(!rs.advance());

        rs.reset();
        assert!(rs.advance());
        assert_eq!(rs.current().unwrap().get_str("name"), Some("Ada"));
    }

    #[test]
    fn empty_result_never_advances() {
        let mut rs = ResultSet::default();
        assert!(rs.is_empty());
        assert!(!rs.advance());
        assert!(rs.current().is_none());
    }

    #[test]
    fn values_serialize_untagged() {
        let json = serde_json::to_string(&sample().row(0).unwrap().values()).unwrap();
        assert_eq!(json, r#"[1,"Ada"]"#);
    }
}
