//! CLI argument parsing

mod common;
mod snapshots;
mod usage;
mod users;

use clap::{Parser, Subcommand};

use crate::config::defaults;

pub use common::OutputFormat;
pub use snapshots::{SnapshotsCommand, SnapshotsConfigArgs, SnapshotsListArgs};
pub use usage::{UsageCommand, UsageResourcesArgs, UsageSummaryArgs};
pub use users::{UsersCommand, UsersGetArgs, UsersListArgs};

/// IBM Cloud platform services CLI
#[derive(Parser, Debug)]
#[command(name = "psctl")]
#[command(version)]
#[command(
    about = "Explore IBM Cloud account users, usage reports and billing snapshots",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Service URL (overrides <SERVICE>_URL and the credentials file)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Bearer token (overrides <SERVICE>_BEARER_TOKEN and the credentials file)
    #[arg(
        short = 't',
        long,
        global = true,
        env = defaults::TOKEN_ENV_VAR,
        hide_env_values = true
    )]
    pub token: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = defaults::LOG_LEVEL)]
    pub log_level: String,

    /// Batch mode: no spinner
    #[arg(long, global = true, default_value_t = false)]
    pub batch: bool,

    /// Omit the header row in table and CSV output
    #[arg(long, global = true, default_value_t = false)]
    pub no_header: bool,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Account users (User Management)
    #[command(subcommand, visible_alias = "user")]
    Users(UsersCommand),

    /// Account and resource instance usage (Usage Reports)
    #[command(subcommand)]
    Usage(UsageCommand),

    /// Billing report snapshots (Usage Reports)
    #[command(subcommand, visible_alias = "snapshot")]
    Snapshots(SnapshotsCommand),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_global_defaults() {
        let cli = Cli::parse_from(["psctl", "users", "list", "--account", "abc"]);
        assert_eq!(cli.log_level, defaults::LOG_LEVEL);
        assert!(cli.url.is_none());
        assert!(!cli.batch);
        assert!(!cli.no_header);
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "psctl",
            "usage",
            "summary",
            "--account",
            "abc",
            "--month",
            "2024-01",
            "--url",
            "http://localhost:8080",
            "-t",
            "secret",
            "-l",
            "debug",
            "--batch",
            "--no-header",
        ]);
        assert_eq!(cli.url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(cli.token.as_deref(), Some("secret"));
        assert_eq!(cli.log_level, "debug");
        assert!(cli.batch);
        assert!(cli.no_header);
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["psctl"]).is_err());
    }

    #[test]
    fn test_cli_alias() {
        let cli = Cli::parse_from(["psctl", "user", "get", "--account", "abc", "IBMid-1"]);
        assert!(matches!(cli.command, Command::Users(UsersCommand::Get(_))));
    }
}
