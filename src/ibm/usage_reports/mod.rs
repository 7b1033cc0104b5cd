//! Usage Reports v4 - account, resource group and instance usage, billing snapshots

mod api;
mod commands;
pub mod models;
pub mod options;

pub use api::UsageReportsV4;
pub use commands::{run_snapshots_command, run_usage_command};
pub use models::{
    AccountSummary, AccountUsage, InstanceUsage, InstancesUsage, OrgUsage, ResourceGroupUsage,
    Snapshot, SnapshotConfig, SnapshotList,
};
pub use options::{
    BillingMonth, GetAccountSummaryOptions, GetReportsSnapshotOptions, GetResourceUsageOptions,
    GetUsageOptions, InstanceFilters, UsageScope,
};
