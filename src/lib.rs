//! psctl - IBM Cloud platform services SDK and CLI
//!
//! Clients for the Usage Reports v4 and User Management v1 APIs, with a
//! cursor pager shared by every list operation.
//!
//! # Example
//!
//! ```no_run
//! use psctl::ibm::user_management::ListUsersOptions;
//! use psctl::{Authenticator, ServiceOptions, UserManagementV1};
//!
//! # async fn run() -> psctl::Result<()> {
//! let client = UserManagementV1::new(
//!     ServiceOptions::new("user_management")
//!         .with_authenticator(Authenticator::BearerToken("token".to_string())),
//! )?;
//!
//! let options = ListUsersOptions::new("my-account").with_limit(50);
//! let mut pager = client.new_users_pager(&options)?;
//! while pager.has_next() {
//!     for user in pager.get_next().await? {
//!         println!("{:?}", user.email);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # CLI
//!
//! ```bash
//! # List active users
//! psctl users list --account abc -s state:ACTIVE
//!
//! # Resource instance usage in a resource group, as JSON
//! psctl usage resources --account abc --month 2024-01 --resource-group rg -o json
//!
//! # Billing report snapshots
//! psctl snapshots list --account abc --month 2024-01
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod ibm;
pub mod output;
pub mod ui;

pub use cli::{Cli, Command, OutputFormat, SnapshotsCommand, UsageCommand, UsersCommand};
pub use error::{PsError, Result};
pub use ibm::{
    run_snapshots_command, run_usage_command, run_users_command, Authenticator, ConfigResolver,
    Pager, ServiceOptions, UsageReportsV4, UserManagementV1,
};
