//! Snapshot output formatter

use super::common::{detail_table, escape_csv, print_detail_csv, print_json, print_yaml};
use crate::cli::OutputFormat;
use crate::ibm::usage_reports::{Snapshot, SnapshotConfig};
use comfy_table::{presets::NOTHING, Table};
use serde::Serialize;

/// Serializable snapshot for structured list output (JSON/YAML)
#[derive(Serialize)]
struct SerializableSnapshot {
    snapshot_id: String,
    state: String,
    month: String,
    account_type: String,
    billing_period: String,
    report_types: Vec<String>,
    files: usize,
}

impl From<&Snapshot> for SerializableSnapshot {
    fn from(snapshot: &Snapshot) -> Self {
        let field = |v: &Option<String>| v.clone().unwrap_or_default();
        let billing_period = snapshot
            .billing_period
            .as_ref()
            .map(|p| {
                format!(
                    "{} - {}",
                    p.start.as_deref().unwrap_or("?"),
                    p.end.as_deref().unwrap_or("?")
                )
            })
            .unwrap_or_default();
        Self {
            snapshot_id: field(&snapshot.snapshot_id),
            state: field(&snapshot.state),
            month: field(&snapshot.month),
            account_type: field(&snapshot.account_type),
            billing_period,
            report_types: snapshot
                .report_types
                .iter()
                .filter_map(|t| t.report_type.clone())
                .collect(),
            files: snapshot.files.len(),
        }
    }
}

/// Output snapshots in the specified format
pub fn output_snapshots(snapshots: &[Snapshot], format: OutputFormat, no_header: bool) {
    let rows: Vec<SerializableSnapshot> =
        snapshots.iter().map(SerializableSnapshot::from).collect();
    match format {
        OutputFormat::Table => println!("{}", snapshots_table(&rows, no_header)),
        OutputFormat::Csv => {
            if !no_header {
                println!("SNAPSHOT_ID,STATE,MONTH,ACCOUNT_TYPE,BILLING_PERIOD,REPORT_TYPES,FILES");
            }
            for row in &rows {
                println!(
                    "{},{},{},{},{},{},{}",
                    escape_csv(&row.snapshot_id),
                    escape_csv(&row.state),
                    escape_csv(&row.month),
                    escape_csv(&row.account_type),
                    escape_csv(&row.billing_period),
                    escape_csv(&row.report_types.join(",")),
                    row.files
                );
            }
        }
        OutputFormat::Json => print_json(&rows),
        OutputFormat::Yaml => print_yaml(&rows),
    }
}

fn snapshots_table(rows: &[SerializableSnapshot], no_header: bool) -> Table {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    if !no_header {
        table.set_header(vec![
            "SNAPSHOT ID",
            "STATE",
            "MONTH",
            "ACCOUNT TYPE",
            "BILLING PERIOD",
            "REPORT TYPES",
            "FILES",
        ]);
    }
    for row in rows {
        table.add_row(vec![
            row.snapshot_id.clone(),
            row.state.clone(),
            row.month.clone(),
            row.account_type.clone(),
            row.billing_period.clone(),
            row.report_types.join(", "),
            row.files.to_string(),
        ]);
    }
    table
}

/// Output a snapshot configuration; JSON/YAML carry the full API object
pub fn output_snapshot_config(config: &SnapshotConfig, format: OutputFormat, no_header: bool) {
    match format {
        OutputFormat::Table => println!("{}", detail_table(&config_rows(config), no_header)),
        OutputFormat::Csv => print_detail_csv(&config_rows(config), no_header),
        OutputFormat::Json => print_json(config),
        OutputFormat::Yaml => print_yaml(config),
    }
}

fn config_rows(config: &SnapshotConfig) -> Vec<(&'static str, String)> {
    let field = |v: &Option<String>| v.clone().unwrap_or_default();
    vec![
        ("ACCOUNT", field(&config.account_id)),
        ("STATE", field(&config.state)),
        ("ACCOUNT TYPE", field(&config.account_type)),
        ("INTERVAL", field(&config.interval)),
        ("VERSIONING", field(&config.versioning)),
        ("REPORT TYPES", config.report_types.join(", ")),
        ("COS BUCKET", field(&config.cos_bucket)),
        ("COS LOCATION", field(&config.cos_location)),
        ("COS FOLDER", field(&config.cos_reports_folder)),
        ("HISTORY", config.history.len().to_string()),
    ]
}
