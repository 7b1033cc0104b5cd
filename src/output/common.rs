//! Common utilities for output formatters

use comfy_table::{presets::NOTHING, Table};
use serde::Serialize;

/// Escape a value for CSV output
/// Handles commas, quotes, and newlines according to RFC 4180
pub fn escape_csv(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize JSON: {}", e),
    }
}

/// Print any serializable value as YAML
pub fn print_yaml<T: Serialize + ?Sized>(value: &T) {
    match serde_yml::to_string(value) {
        Ok(yaml) => print!("{}", yaml),
        Err(e) => eprintln!("Failed to serialize YAML: {}", e),
    }
}

/// Format an optional amount with two decimals, empty when absent
pub fn format_amount(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_default()
}

/// Two-column FIELD/VALUE table for single objects
pub fn detail_table(rows: &[(&str, String)], no_header: bool) -> Table {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    if !no_header {
        table.set_header(vec!["FIELD", "VALUE"]);
    }
    for (field, value) in rows {
        table.add_row(vec![field.to_string(), value.clone()]);
    }
    table
}

/// CSV rendition of [`detail_table`]
pub fn print_detail_csv(rows: &[(&str, String)], no_header: bool) {
    if !no_header {
        println!("FIELD,VALUE");
    }
    for (field, value) in rows {
        println!("{},{}", field, escape_csv(value));
    }
}
