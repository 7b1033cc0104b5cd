//! IBM Cloud platform services client module
//!
//! This module provides the Usage Reports v4 and User Management v1 clients
//! and the cursor pager shared by their list operations.

mod authenticator;
mod client;
mod credentials;
pub mod helpers;
pub mod pager;
pub mod traits;
pub mod usage_reports;
pub mod user_management;

use serde::{Deserialize, Serialize};

pub use authenticator::Authenticator;
pub use client::{ServiceClient, ServiceOptions};
pub(crate) use client::{require, segment, Query};
pub use credentials::ConfigResolver;
pub use helpers::collect_pages;
pub use pager::{start_from_link, Pager};
pub use traits::{Page, PageFetcher, PagedRequest};
pub use usage_reports::{run_snapshots_command, run_usage_command, UsageReportsV4};
pub use user_management::{run_users_command, UserManagementV1};

/// Link to a page of results (shared by Usage Reports list responses)
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
pub struct PageLink {
    /// URL of the page, including the `_start` cursor when there is one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Cursor value the server exposes separately
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<String>,
}
