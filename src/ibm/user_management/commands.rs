//! User command handlers

use log::debug;

use crate::cli::{Cli, UsersCommand, UsersListArgs};
use crate::ibm::helpers::collect_pages;
use crate::output::{output_user, output_users};
use crate::ui::{create_spinner, finish_spinner};

use super::api::UserManagementV1;
use super::options::ListUsersOptions;

/// Run a 'users' subcommand
pub async fn run_users_command(
    client: &UserManagementV1,
    command: &UsersCommand,
    cli: &Cli,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    match command {
        UsersCommand::List(args) => run_list(client, args, cli.batch, cli.no_header).await,
        UsersCommand::Get(args) => {
            debug!("Fetching user '{}' in account '{}'", args.iam_id, args.account);
            let spinner = create_spinner(&format!("Fetching user '{}'...", args.iam_id), cli.batch);
            let result = client
                .get_user_profile(&args.account, &args.iam_id, None)
                .await;
            finish_spinner(spinner);

            let user = result?.ok_or_else(|| {
                format!(
                    "User '{}' not found in account '{}'",
                    args.iam_id, args.account
                )
            })?;
            output_user(&user, args.output, cli.no_header);
            Ok(())
        }
    }
}

fn list_options(args: &UsersListArgs) -> ListUsersOptions {
    let mut options = ListUsersOptions::new(&args.account);
    if let Some(search) = &args.search {
        options = options.with_search(search);
    }
    if let Some(user_id) = &args.user_id {
        options = options.with_user_id(user_id);
    }
    if args.include_settings {
        options = options.with_include_settings(true);
    }
    if let Some(limit) = args.limit {
        options = options.with_limit(limit);
    }
    options
}

async fn run_list(
    client: &UserManagementV1,
    args: &UsersListArgs,
    batch: bool,
    no_header: bool,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let options = list_options(args);
    let pager = client.new_users_pager(&options)?;

    let spinner = create_spinner(
        &format!("Fetching users for account '{}'...", args.account),
        batch,
    );
    let result = collect_pages(pager, spinner.as_ref(), "users").await;
    finish_spinner(spinner);
    let users = result?;

    if users.is_empty() {
        if args.search.is_some() || args.user_id.is_some() {
            eprintln!("No users found matching filter");
        } else {
            eprintln!("No users found in account '{}'", args.account);
        }
        // Structured formats still print an empty document
        if !args.output.is_structured() {
            return Ok(());
        }
    }

    output_users(&users, args.output, no_header);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Command, OutputFormat};
    use crate::ibm::traits::PagedRequest;
    use clap::Parser;

    fn list_args(extra: &[&str]) -> UsersListArgs {
        let mut argv = vec!["psctl", "users", "list", "-a", "abc"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Command::Users(UsersCommand::List(args)) => args,
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_list_options_defaults() {
        let options = list_options(&list_args(&[]));
        assert_eq!(options.account_id, "abc");
        assert!(options.include_settings.is_none());
        assert!(options.limit.is_none());
        assert!(options.start().is_none());
    }

    #[test]
    fn test_list_options_all_flags() {
        let options = list_options(&list_args(&[
            "-s",
            "state:ACTIVE",
            "--user-id",
            "ada@example.com",
            "--include-settings",
            "--limit",
            "25",
        ]));
        assert_eq!(options.search.as_deref(), Some("state:ACTIVE"));
        assert_eq!(options.user_id.as_deref(), Some("ada@example.com"));
        assert_eq!(options.include_settings, Some(true));
        assert_eq!(options.limit, Some(25));
        assert_eq!(list_args(&["-o", "csv"]).output, OutputFormat::Csv);
    }
}
