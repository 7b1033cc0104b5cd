//! Usage output formatter

use super::common::{escape_csv, format_amount, print_json, print_yaml};
use crate::cli::OutputFormat;
use crate::ibm::usage_reports::models::Resource;
use crate::ibm::usage_reports::{AccountSummary, InstanceUsage};
use comfy_table::{presets::NOTHING, Table};
use serde::Serialize;

/// Serializable instance usage row for structured output (JSON/YAML)
#[derive(Serialize)]
struct SerializableInstance {
    resource_instance_id: String,
    resource_instance_name: String,
    resource_name: String,
    plan_name: String,
    region: String,
    resource_group_name: String,
    cost: f64,
    currency_code: String,
}

impl From<&InstanceUsage> for SerializableInstance {
    fn from(instance: &InstanceUsage) -> Self {
        let field = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            resource_instance_id: field(&instance.resource_instance_id),
            resource_instance_name: field(&instance.resource_instance_name),
            resource_name: field(&instance.resource_name),
            plan_name: field(&instance.plan_name),
            region: field(&instance.region),
            resource_group_name: field(&instance.resource_group_name),
            cost: instance.total_cost(),
            currency_code: field(&instance.currency_code),
        }
    }
}

/// Output resource instance usage in the specified format
pub fn output_instance_usage(instances: &[InstanceUsage], format: OutputFormat, no_header: bool) {
    let rows: Vec<SerializableInstance> =
        instances.iter().map(SerializableInstance::from).collect();
    match format {
        OutputFormat::Table => println!("{}", instances_table(&rows, no_header)),
        OutputFormat::Csv => {
            if !no_header {
                println!("INSTANCE_ID,NAME,RESOURCE,PLAN,REGION,RESOURCE_GROUP,COST,CURRENCY");
            }
            for row in &rows {
                println!(
                    "{},{},{},{},{},{},{:.2},{}",
                    escape_csv(&row.resource_instance_id),
                    escape_csv(&row.resource_instance_name),
                    escape_csv(&row.resource_name),
                    escape_csv(&row.plan_name),
                    escape_csv(&row.region),
                    escape_csv(&row.resource_group_name),
                    row.cost,
                    escape_csv(&row.currency_code)
                );
            }
        }
        OutputFormat::Json => print_json(&rows),
        OutputFormat::Yaml => print_yaml(&rows),
    }
}

fn instances_table(rows: &[SerializableInstance], no_header: bool) -> Table {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    if !no_header {
        table.set_header(vec![
            "INSTANCE ID",
            "NAME",
            "RESOURCE",
            "PLAN",
            "REGION",
            "RESOURCE GROUP",
            "COST",
            "CURRENCY",
        ]);
    }
    for row in rows {
        table.add_row(vec![
            row.resource_instance_id.clone(),
            row.resource_instance_name.clone(),
            row.resource_name.clone(),
            row.plan_name.clone(),
            row.region.clone(),
            row.resource_group_name.clone(),
            format!("{:.2}", row.cost),
            row.currency_code.clone(),
        ]);
    }
    table
}

/// Output an account summary; JSON/YAML carry the full API object
pub fn output_account_summary(summary: &AccountSummary, format: OutputFormat, no_header: bool) {
    match format {
        OutputFormat::Table => println!("{}", summary_table(summary, no_header)),
        OutputFormat::Csv => {
            if !no_header {
                println!("RESOURCE_ID,RESOURCE,BILLABLE_COST,NON_BILLABLE_COST");
            }
            for resource in &summary.account_resources {
                let (id, name, billable, non_billable) = resource_columns(resource);
                println!(
                    "{},{},{},{}",
                    escape_csv(&id),
                    escape_csv(&name),
                    billable,
                    non_billable
                );
            }
        }
        OutputFormat::Json => print_json(summary),
        OutputFormat::Yaml => print_yaml(summary),
    }
}

fn resource_columns(resource: &Resource) -> (String, String, String, String) {
    (
        resource.resource_id.clone().unwrap_or_default(),
        resource.resource_name.clone().unwrap_or_default(),
        format_amount(resource.billable_cost),
        format_amount(resource.non_billable_cost),
    )
}

fn summary_table(summary: &AccountSummary, no_header: bool) -> Table {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    if !no_header {
        table.set_header(vec!["RESOURCE ID", "RESOURCE", "BILLABLE", "NON-BILLABLE"]);
    }
    for resource in &summary.account_resources {
        let (id, name, billable, non_billable) = resource_columns(resource);
        table.add_row(vec![id, name, billable, non_billable]);
    }
    if let Some(totals) = &summary.resources {
        table.add_row(vec![
            String::new(),
            format!(
                "TOTAL ({})",
                summary.billing_currency_code.as_deref().unwrap_or("-")
            ),
            format_amount(totals.billable_cost),
            format_amount(totals.non_billable_cost),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_instance(id: &str, costs: &[f64]) -> InstanceUsage {
        let usage: Vec<serde_json::Value> = costs
            .iter()
            .map(|c| serde_json::json!({"metric": "GB_HOURS", "cost": c}))
            .collect();
        serde_json::from_value(serde_json::json!({
            "resource_instance_id": id,
            "resource_instance_name": "my-bucket",
            "resource_name": "Cloud Object Storage",
            "plan_name": "Standard",
            "region": "us-south",
            "currency_code": "USD",
            "usage": usage
        }))
        .unwrap()
    }

    #[test]
    fn test_serializable_instance_sums_cost() {
        let instance = create_test_instance("crn:v1:1", &[1.25, 2.5]);
        let row = SerializableInstance::from(&instance);
        assert_eq!(row.resource_instance_id, "crn:v1:1");
        assert!((row.cost - 3.75).abs() < f64::EPSILON);
        assert_eq!(row.resource_group_name, "");
    }

    #[test]
    fn test_instances_table() {
        let rows = vec![SerializableInstance::from(&create_test_instance(
            "crn:v1:1",
            &[10.0],
        ))];
        let table = instances_table(&rows, false).to_string();
        assert!(table.contains("INSTANCE ID"));
        assert!(table.contains("10.00"));
        assert!(table.contains("us-south"));
    }

    #[test]
    fn test_summary_table_totals() {
        let summary: AccountSummary = serde_json::from_value(serde_json::json!({
            "account_id": "abc",
            "month": "2024-01",
            "billing_currency_code": "USD",
            "resources": {"billable_cost": 100.0, "non_billable_cost": 5.5},
            "account_resources": [
                {"resource_id": "cloud-object-storage", "resource_name": "COS", "billable_cost": 100.0, "non_billable_cost": 5.5}
            ]
        }))
        .unwrap();
        let table = summary_table(&summary, true).to_string();
        assert!(table.contains("cloud-object-storage"));
        assert!(table.contains("TOTAL (USD)"));
        assert!(table.contains("5.50"));
        assert!(!table.contains("RESOURCE ID"));
    }
}
