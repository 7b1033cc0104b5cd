//! Usage command arguments

use clap::{Parser, Subcommand};

use super::common::OutputFormat;
use crate::ibm::usage_reports::BillingMonth;

/// Subcommands for 'usage'
#[derive(Subcommand, Debug)]
pub enum UsageCommand {
    /// Account summary for a billing month
    Summary(UsageSummaryArgs),

    /// Resource instance usage for a billing month
    #[command(visible_alias = "instances")]
    Resources(UsageResourcesArgs),
}

/// Arguments for 'usage summary'
#[derive(Parser, Debug)]
pub struct UsageSummaryArgs {
    /// Account ID
    #[arg(short, long)]
    pub account: String,

    /// Billing month (YYYY-MM)
    #[arg(short, long)]
    pub month: BillingMonth,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

/// Arguments for 'usage resources'
#[derive(Parser, Debug)]
pub struct UsageResourcesArgs {
    /// Account ID
    #[arg(short, long)]
    pub account: String,

    /// Billing month (YYYY-MM)
    #[arg(short, long)]
    pub month: BillingMonth,

    /// Only instances in this resource group
    #[arg(long, conflicts_with = "org")]
    pub resource_group: Option<String>,

    /// Only instances in this Cloud Foundry organization
    #[arg(long)]
    pub org: Option<String>,

    /// Only instances of this resource (catalog ID)
    #[arg(long)]
    pub resource_id: Option<String>,

    /// Only instances on this plan
    #[arg(long)]
    pub plan_id: Option<String>,

    /// Only instances in this region
    #[arg(long)]
    pub region: Option<String>,

    /// Page size requested from the API (1-30)
    #[arg(long, value_parser = clap::value_parser!(i64).range(1..=30))]
    pub limit: Option<i64>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}
