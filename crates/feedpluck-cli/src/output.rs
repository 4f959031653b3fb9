use serde_json::Value;

use crate::cli::OutputFormat;
use crate::commands::Report;
use crate::error::CliError;

pub fn render(report: &Report, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }

    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(&report.data)?
            } else {
                serde_json::to_string(&report.data)?
            };
            println!("{payload}");
        }
        OutputFormat::Ndjson => {
            for line in ndjson_lines(&report.data)? {
                println!("{line}");
            }
        }
        OutputFormat::Table => {
            for line in table_lines(&report.data) {
                println!("{line}");
            }
        }
    }

    Ok(())
}

fn ndjson_lines(data: &Value) -> Result<Vec<String>, CliError> {
    match data {
        Value::Array(items) => items
            .iter()
            .map(|item| serde_json::to_string(item).map_err(CliError::from))
            .collect(),
        other => Ok(vec![serde_json::to_string(other)?]),
    }
}

fn table_lines(data: &Value) -> Vec<String> {
    match data {
        Value::Array(items) => rows_table(items),
        Value::Object(object) => {
            let width = object.keys().map(String::len).max().unwrap_or(0);
            object
                .iter()
                .map(|(key, value)| format!("{key:<width$} : {}", cell_text(value)))
                .collect()
        }
        other => vec![cell_text(other)],
    }
}

/// Aligned columns, headed by the keys of the first object.
fn rows_table(items: &[Value]) -> Vec<String> {
    let headers: Vec<String> = items
        .first()
        .and_then(Value::as_object)
        .map(|object| object.keys().cloned().collect())
        .unwrap_or_default();

    if headers.is_empty() {
        return items.iter().map(cell_text).collect();
    }

    let cells: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            headers
                .iter()
                .map(|header| item.get(header).map_or_else(|| String::from("-"), cell_text))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            cells
                .iter()
                .map(|row| row[index].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let format_row = |values: &[String]| {
        values
            .iter()
            .zip(&widths)
            .map(|(value, width)| format!("{value:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_owned()
    };

    let mut lines = Vec::with_capacity(cells.len() + 1);
    lines.push(format_row(&headers));
    lines.extend(cells.iter().map(|row| format_row(row)));
    lines
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
