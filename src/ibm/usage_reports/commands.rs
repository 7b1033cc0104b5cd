//! Usage and snapshot command handlers

use log::debug;

use crate::cli::{Cli, SnapshotsCommand, UsageCommand, UsageResourcesArgs};
use crate::error::Result;
use crate::ibm::helpers::collect_pages;
use crate::ibm::Pager;
use crate::output::{
    output_account_summary, output_instance_usage, output_snapshot_config, output_snapshots,
};
use crate::ui::{create_spinner, finish_spinner};

use super::api::UsageReportsV4;
use super::options::{
    GetAccountSummaryOptions, GetReportsSnapshotOptions, GetResourceUsageOptions, InstanceFilters,
    UsageScope,
};

/// Run a 'usage' subcommand
pub async fn run_usage_command(
    client: &UsageReportsV4,
    command: &UsageCommand,
    cli: &Cli,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    match command {
        UsageCommand::Summary(args) => {
            debug!(
                "Fetching account summary for '{}' ({})",
                args.account, args.month
            );
            let spinner = create_spinner(
                &format!("Fetching account summary for {}...", args.month),
                cli.batch,
            );
            let options = GetAccountSummaryOptions::new(&args.account, args.month.clone());
            let result = client.get_account_summary(&options).await;
            finish_spinner(spinner);

            match result? {
                Some(summary) => output_account_summary(&summary, args.output, cli.no_header),
                None => eprintln!("No summary returned for account '{}'", args.account),
            }
            Ok(())
        }
        UsageCommand::Resources(args) => run_resources(client, args, cli).await,
    }
}

fn resource_usage_options(args: &UsageResourcesArgs) -> GetResourceUsageOptions {
    let options = match (&args.resource_group, &args.org) {
        (Some(group), _) => {
            GetResourceUsageOptions::resource_group(&args.account, group, args.month.clone())
        }
        (None, Some(org)) => {
            GetResourceUsageOptions::organization(&args.account, org, args.month.clone())
        }
        (None, None) => GetResourceUsageOptions::account(&args.account, args.month.clone()),
    };

    let options = options.with_names(true).with_filters(InstanceFilters {
        resource_instance_id: None,
        resource_id: args.resource_id.clone(),
        plan_id: args.plan_id.clone(),
        region: args.region.clone(),
    });
    match args.limit {
        Some(limit) => options.with_limit(limit),
        None => options,
    }
}

/// Pager constructor matching the scope already chosen for `options`
fn resource_usage_pager<'c>(
    client: &'c UsageReportsV4,
    options: &GetResourceUsageOptions,
) -> Result<Pager<'c, UsageReportsV4, GetResourceUsageOptions>> {
    match options.scope {
        UsageScope::ResourceGroup(_) => client.new_resource_usage_resource_group_pager(options),
        UsageScope::Organization(_) => client.new_resource_usage_org_pager(options),
        UsageScope::Account { .. } => client.new_resource_usage_account_pager(options),
    }
}

async fn run_resources(
    client: &UsageReportsV4,
    args: &UsageResourcesArgs,
    cli: &Cli,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let options = resource_usage_options(args);
    let pager = resource_usage_pager(client, &options)?;

    let spinner = create_spinner(
        &format!("Fetching resource instance usage for {}...", args.month),
        cli.batch,
    );
    let result = collect_pages(pager, spinner.as_ref(), "resource instances").await;
    finish_spinner(spinner);
    let instances = result?;

    if instances.is_empty() {
        eprintln!(
            "No resource instance usage found for account '{}' in {}",
            args.account, args.month
        );
        return Ok(());
    }

    output_instance_usage(&instances, args.output, cli.no_header);
    Ok(())
}

/// Run a 'snapshots' subcommand
pub async fn run_snapshots_command(
    client: &UsageReportsV4,
    command: &SnapshotsCommand,
    cli: &Cli,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    match command {
        SnapshotsCommand::List(args) => {
            let mut options = GetReportsSnapshotOptions::new(&args.account, args.month.clone())
                .with_date_range(args.date_from, args.date_to);
            if let Some(limit) = args.limit {
                options = options.with_limit(limit);
            }
            let pager = client.new_reports_snapshot_pager(&options)?;

            let spinner = create_spinner(
                &format!("Fetching snapshots for {}...", args.month),
                cli.batch,
            );
            let result = collect_pages(pager, spinner.as_ref(), "snapshots").await;
            finish_spinner(spinner);
            let snapshots = result?;

            if snapshots.is_empty() {
                eprintln!(
                    "No snapshots found for account '{}' in {}",
                    args.account, args.month
                );
                return Ok(());
            }
            output_snapshots(&snapshots, args.output, cli.no_header);
            Ok(())
        }
        SnapshotsCommand::Config(args) => {
            let spinner = create_spinner("Fetching snapshot configuration...", cli.batch);
            let result = client.get_reports_snapshot_config(&args.account).await;
            finish_spinner(spinner);

            match result? {
                Some(config) => output_snapshot_config(&config, args.output, cli.no_header),
                None => eprintln!(
                    "No snapshot configuration found for account '{}'",
                    args.account
                ),
            }
            Ok(())
        }
    }
}
