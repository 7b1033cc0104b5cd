//! Users command arguments

use clap::{Parser, Subcommand};

use super::common::OutputFormat;

/// Subcommands for 'users'
#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// List users in an account
    #[command(visible_alias = "ls")]
    List(UsersListArgs),

    /// Show one user's profile
    Get(UsersGetArgs),
}

/// Arguments for 'users list'
#[derive(Parser, Debug)]
pub struct UsersListArgs {
    /// Account ID
    #[arg(short, long)]
    pub account: String,

    /// Search expression (e.g. "state:ACTIVE")
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only the user with this login ID
    #[arg(long)]
    pub user_id: Option<String>,

    /// Include user settings in the response
    #[arg(long, default_value_t = false)]
    pub include_settings: bool,

    /// Page size requested from the API (1-100)
    #[arg(long, value_parser = clap::value_parser!(i64).range(1..=100))]
    pub limit: Option<i64>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

/// Arguments for 'users get'
#[derive(Parser, Debug)]
pub struct UsersGetArgs {
    /// IAM ID of the user
    pub iam_id: String,

    /// Account ID
    #[arg(short, long)]
    pub account: String,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}
