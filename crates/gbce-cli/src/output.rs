use std::io::Write;

use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(data: &Value, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(data)?
            } else {
                serde_json::to_string(data)?
            };
            writeln!(stdout, "{payload}")?;
        }
        OutputFormat::Table => {
            let rows = table_rows(data);
            let width = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
            for (key, value) in rows {
                writeln!(stdout, "{key:<width$} : {value}")?;
            }
        }
    }

    Ok(())
}

/// Flatten nested JSON into `path : value` rows, e.g. `stocks[0].symbol`.
fn table_rows(data: &Value) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    flatten(String::new(), data, &mut rows);
    rows
}

fn flatten(path: String, value: &Value, rows: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                flatten(child_path, child, rows);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten(format!("{path}[{index}]"), child, rows);
            }
        }
        Value::String(text) => rows.push((path, text.clone())),
        Value::Null => rows.push((path, String::from("-"))),
        other => rows.push((path, other.to_string())),
    }
}
