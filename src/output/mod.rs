//! Output formatting module
//!
//! Handles different output formats: table, CSV, JSON, YAML

mod common;
mod snapshots;
mod usage;
mod users;

pub use common::{escape_csv, print_json, print_yaml};
pub use snapshots::{output_snapshot_config, output_snapshots};
pub use usage::{output_account_summary, output_instance_usage};
pub use users::{output_user, output_users};
