//! User Management data models

use serde::{Deserialize, Serialize};

use crate::ibm::traits::Page;

/// One page of account users
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct UserList {
    pub total_results: Option<i64>,
    pub limit: Option<i64>,
    pub first_url: Option<String>,
    pub next_url: Option<String>,
    #[serde(default)]
    pub resources: Vec<UserProfile>,
}

impl Page for UserList {
    type Item = UserProfile;

    fn next_link(&self) -> Option<&str> {
        self.next_url.as_deref()
    }

    fn into_items(self) -> Vec<UserProfile> {
        self.resources
    }
}

/// User profile within an account
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct UserProfile {
    pub id: Option<String>,
    pub iam_id: Option<String>,
    pub realm: Option<String>,
    pub user_id: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    /// One of `PROCESSING`, `PENDING`, `ACTIVE`,
    /// `DISABLED_CLASSIC_INFRASTRUCTURE`, `VPN_ONLY`
    pub state: Option<String>,
    pub email: Option<String>,
    pub phonenumber: Option<String>,
    pub altphonenumber: Option<String>,
    pub photo: Option<String>,
    pub account_id: Option<String>,
    pub added_on: Option<String>,
}

impl UserProfile {
    /// "First Last", falling back to whichever part is present
    pub fn display_name(&self) -> String {
        match (self.firstname.as_deref(), self.lastname.as_deref()) {
            (Some(f), Some(l)) => format!("{} {}", f, l),
            (Some(n), None) | (None, Some(n)) => n.to_string(),
            (None, None) => String::new(),
        }
    }
}

/// Per-user account settings
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct UserSettings {
    pub language: Option<String>,
    pub notification_language: Option<String>,
    /// Comma-separated addresses or ranges
    pub allowed_ip_addresses: Option<String>,
    pub self_manage: Option<bool>,
}

/// Result of an invitation
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct InvitedUserList {
    #[serde(default)]
    pub resources: Vec<InvitedUser>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct InvitedUser {
    pub email: Option<String>,
    pub id: Option<String>,
    pub state: Option<String>,
}
