//! Snapshots command arguments

use clap::{Parser, Subcommand};

use super::common::OutputFormat;
use crate::ibm::usage_reports::BillingMonth;

/// Subcommands for 'snapshots'
#[derive(Subcommand, Debug)]
pub enum SnapshotsCommand {
    /// List billing report snapshots for a month
    #[command(visible_alias = "ls")]
    List(SnapshotsListArgs),

    /// Show the snapshot configuration of an account
    Config(SnapshotsConfigArgs),
}

/// Arguments for 'snapshots list'
#[derive(Parser, Debug)]
pub struct SnapshotsListArgs {
    /// Account ID
    #[arg(short, long)]
    pub account: String,

    /// Billing month (YYYY-MM)
    #[arg(short, long)]
    pub month: BillingMonth,

    /// Only snapshots taken at or after this time (epoch milliseconds)
    #[arg(long)]
    pub date_from: Option<i64>,

    /// Only snapshots taken at or before this time (epoch milliseconds)
    #[arg(long)]
    pub date_to: Option<i64>,

    /// Page size requested from the API (1-30)
    #[arg(long, value_parser = clap::value_parser!(i64).range(1..=30))]
    pub limit: Option<i64>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

/// Arguments for 'snapshots config'
#[derive(Parser, Debug)]
pub struct SnapshotsConfigArgs {
    /// Account ID
    #[arg(short, long)]
    pub account: String,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}
