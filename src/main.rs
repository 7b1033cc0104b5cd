//! psctl - Main entry point

use clap::Parser;
use log::{debug, info};

use psctl::config::api::{usage_reports, user_management};
use psctl::{
    run_snapshots_command, run_usage_command, run_users_command, Cli, Command, ConfigResolver,
    UsageReportsV4, UserManagementV1,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    info!("Starting psctl v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    match &cli.command {
        Command::Users(command) => {
            let options = ConfigResolver::new(user_management::SERVICE_NAME)
                .resolve(cli.url.as_deref(), cli.token.as_deref())?;
            let client = UserManagementV1::new(options)?;
            debug!("Using {}", client.service().service_url());
            run_users_command(&client, command, cli).await
        }
        Command::Usage(command) => {
            let client = usage_client(cli)?;
            run_usage_command(&client, command, cli).await
        }
        Command::Snapshots(command) => {
            let client = usage_client(cli)?;
            run_snapshots_command(&client, command, cli).await
        }
    }
}

fn usage_client(cli: &Cli) -> Result<UsageReportsV4, Box<dyn std::error::Error>> {
    let options = ConfigResolver::new(usage_reports::SERVICE_NAME)
        .resolve(cli.url.as_deref(), cli.token.as_deref())?;
    let client = UsageReportsV4::new(options)?;
    debug!("Using {}", client.service().service_url());
    Ok(client)
}
