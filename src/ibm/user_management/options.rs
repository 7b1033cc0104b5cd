//! User Management request options

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{PsError, Result};
use crate::ibm::traits::PagedRequest;

/// User state that can be set on a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserState {
    Processing,
    Pending,
    Active,
    DisabledClassicInfrastructure,
    VpnOnly,
}

impl UserState {
    const ALL: [UserState; 5] = [
        UserState::Processing,
        UserState::Pending,
        UserState::Active,
        UserState::DisabledClassicInfrastructure,
        UserState::VpnOnly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserState::Processing => "PROCESSING",
            UserState::Pending => "PENDING",
            UserState::Active => "ACTIVE",
            UserState::DisabledClassicInfrastructure => "DISABLED_CLASSIC_INFRASTRUCTURE",
            UserState::VpnOnly => "VPN_ONLY",
        }
    }
}

impl FromStr for UserState {
    type Err = PsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| PsError::invalid(format!("unknown user state '{}'", s)))
    }
}

impl fmt::Display for UserState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account role given to invited users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AccountRole {
    Member,
}

impl FromStr for AccountRole {
    type Err = PsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Member" => Ok(AccountRole::Member),
            other => Err(PsError::invalid(format!(
                "unknown account role '{}' (expected: Member)",
                other
            ))),
        }
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountRole::Member => write!(f, "Member"),
        }
    }
}

/// Options for the paged user list
#[derive(Debug, Clone)]
pub struct ListUsersOptions {
    pub account_id: String,
    /// Page size, 1 to 100
    pub limit: Option<i64>,
    pub include_settings: Option<bool>,
    /// Filter expression, e.g. `state:ACTIVE`
    pub search: Option<String>,
    pub start: Option<String>,
    pub user_id: Option<String>,
}

impl ListUsersOptions {
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            limit: None,
            include_settings: None,
            search: None,
            start: None,
            user_id: None,
        }
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_include_settings(mut self, include: bool) -> Self {
        self.include_settings = Some(include);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

impl PagedRequest for ListUsersOptions {
    fn start(&self) -> Option<&str> {
        self.start.as_deref()
    }

    fn set_start(&mut self, start: Option<String>) {
        self.start = start;
    }
}

/// User to invite
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InviteUser {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_role: Option<AccountRole>,
}

/// Policy granted to invited users
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InviteUserIamPolicy {
    #[serde(rename = "type")]
    pub policy_type: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<Role>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<Resource>,
}

impl InviteUserIamPolicy {
    pub fn new(policy_type: impl Into<String>) -> Result<Self> {
        let policy_type = policy_type.into();
        if policy_type.is_empty() {
            return Err(PsError::invalid("policy 'type' must not be empty"));
        }
        Ok(Self {
            policy_type,
            roles: Vec::new(),
            resources: Vec::new(),
        })
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Role {
    pub role_id: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Resource {
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Body for `invite_users`
#[derive(Debug, Clone, Serialize)]
pub struct InviteUsersOptions {
    #[serde(skip)]
    pub account_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<InviteUser>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub iam_policy: Vec<InviteUserIamPolicy>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub access_groups: Vec<String>,
}

impl InviteUsersOptions {
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            users: Vec::new(),
            iam_policy: Vec::new(),
            access_groups: Vec::new(),
        }
    }
}

/// Body for `update_user_profile`; unset fields are left unchanged
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateUserProfileOptions {
    #[serde(skip)]
    pub account_id: String,
    #[serde(skip)]
    pub iam_id: String,
    #[serde(skip)]
    pub include_activity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<UserState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phonenumber: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altphonenumber: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl UpdateUserProfileOptions {
    pub fn new(account_id: impl Into<String>, iam_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            iam_id: iam_id.into(),
            ..Default::default()
        }
    }
}

/// Body for `update_user_settings`; unset fields are left unchanged
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateUserSettingsOptions {
    #[serde(skip)]
    pub account_id: String,
    #[serde(skip)]
    pub iam_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_ip_addresses: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_manage: Option<bool>,
}

impl UpdateUserSettingsOptions {
    pub fn new(account_id: impl Into<String>, iam_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            iam_id: iam_id.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_state_names() {
        for state in UserState::ALL {
            assert_eq!(state.as_str().parse::<UserState>().unwrap(), state);
            assert_eq!(serde_json::to_value(state).unwrap(), state.as_str());
        }
        assert!("active".parse::<UserState>().is_err());
        assert!("DELETED".parse::<UserState>().is_err());
    }

    #[test]
    fn test_account_role() {
        assert_eq!("Member".parse::<AccountRole>().unwrap(), AccountRole::Member);
        assert!("Owner".parse::<AccountRole>().is_err());
    }

    #[test]
    fn test_iam_policy_requires_type() {
        assert!(InviteUserIamPolicy::new("").is_err());
        let policy = InviteUserIamPolicy::new("access").unwrap();
        assert_eq!(
            serde_json::to_value(&policy).unwrap(),
            serde_json::json!({"type": "access"})
        );
    }

    #[test]
    fn test_invite_body_omits_account_id() {
        let mut options = InviteUsersOptions::new("abc");
        options.users.push(InviteUser {
            email: "user@example.com".to_string(),
            account_role: Some(AccountRole::Member),
        });
        options.access_groups.push("AccessGroupId-1".to_string());
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            serde_json::json!({
                "users": [{"email": "user@example.com", "account_role": "Member"}],
                "access_groups": ["AccessGroupId-1"]
            })
        );
    }

    #[test]
    fn test_update_profile_body() {
        let mut options = UpdateUserProfileOptions::new("abc", "IBMid-1");
        options.state = Some(UserState::VpnOnly);
        options.photo = Some(String::new());
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            serde_json::json!({"state": "VPN_ONLY", "photo": ""})
        );
    }

    #[test]
    fn test_list_users_builder() {
        let options = ListUsersOptions::new("abc")
            .with_limit(10)
            .with_search("state:ACTIVE")
            .with_include_settings(true);
        assert_eq!(options.limit, Some(10));
        assert_eq!(options.search.as_deref(), Some("state:ACTIVE"));
        assert!(options.start().is_none());
    }
}
