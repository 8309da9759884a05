//! Rendering of query results: aligned table, CSV or JSON.

use crate::db::result_set::{ResultSet, SqlValue};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::table::Table;
use clap::ValueEnum;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

pub fn render(rows: &ResultSet, format: OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Table => Ok(render_table(rows)),
        OutputFormat::Csv => render_csv(rows),
        OutputFormat::Json => render_json(rows),
    }
}

/// Render and write to `path`, reporting success on stdout.
pub fn write_to(rows: &ResultSet, format: OutputFormat, path: &Path) -> AppResult<()> {
    let content = render(rows, format)?;
    fs::write(path, content)?;
    success(format!(
        "{} export completed: {} ({} rows)",
        format.as_str().to_uppercase(),
        path.display(),
        rows.len()
    ));
    Ok(())
}

fn render_table(rows: &ResultSet) -> String {
    let mut table = Table::with_headers(rows.columns());
    for row in rows.rows() {
        table.add_row(row.values().iter().map(SqlValue::to_string).collect());
    }

    let mut out = table.render();
    out.push_str(&format!(
        "({} row{})\n",
        rows.len(),
        if rows.len() == 1 { "" } else { "s" }
    ));
    out
}

fn render_csv(rows: &ResultSet) -> AppResult<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(rows.columns())?;

    for row in rows.rows() {
        // NULL becomes an empty field.
        wtr.write_record(row.values().iter().map(|v| match v {
            SqlValue::Null => String::new(),
            other => other.to_string(),
        }))?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| AppError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| AppError::Export(e.to_string()))
}

fn render_json(rows: &ResultSet) -> AppResult<String> {
    let records: Vec<Map<String, Value>> = rows
        .rows()
        .map(|row| {
            rows.columns()
                .iter()
                .cloned()
                .zip(row.values().iter().map(|v| serde_json::to_value(v).unwrap_or(Value::Null)))
                .collect()
        })
        .collect();

    let mut out = serde_json::to_string_pretty(&records)?;
    out.push('\n');
    Ok(out)
}
