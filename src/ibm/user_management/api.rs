//! User Management v1 API operations

use log::debug;

use crate::config::api::{user_management as api, START_PARAM};
use crate::error::{PsError, Result};
use crate::ibm::traits::PageFetcher;
use crate::ibm::{require, segment, Pager, Query, ServiceClient, ServiceOptions};

use super::models::{InvitedUserList, UserList, UserProfile, UserSettings};
use super::options::{
    InviteUsersOptions, ListUsersOptions, UpdateUserProfileOptions, UpdateUserSettingsOptions,
};

/// Client for the User Management v1 service
#[derive(Debug, Clone)]
pub struct UserManagementV1 {
    service: ServiceClient,
}

impl UserManagementV1 {
    /// Create a client; `options.url` defaults to the public endpoint
    pub fn new(options: ServiceOptions) -> Result<Self> {
        Ok(Self {
            service: ServiceClient::new(options, api::DEFAULT_URL)?,
        })
    }

    /// Create a client from `USER_MANAGEMENT_*` environment variables or a credentials file
    pub fn from_external_config() -> Result<Self> {
        Self::new(ServiceOptions::from_external_config(api::SERVICE_NAME)?)
    }

    /// The service has no regional endpoints
    pub fn service_url_for_region(region: &str) -> Result<String> {
        Err(PsError::Config(format!(
            "service does not support regional URLs (requested '{}')",
            region
        )))
    }

    pub fn service(&self) -> &ServiceClient {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut ServiceClient {
        &mut self.service
    }

    fn users_path(account_id: &str) -> String {
        format!("{}/{}/users", api::ACCOUNTS_V2, segment(account_id))
    }

    fn user_path(account_id: &str, iam_id: &str) -> String {
        format!("{}/{}", Self::users_path(account_id), segment(iam_id))
    }

    /// Get one page of users in an account
    pub async fn list_users(&self, options: &ListUsersOptions) -> Result<Option<UserList>> {
        require("account_id", &options.account_id)?;

        let mut query = Query::new();
        query
            .push_opt("limit", options.limit)
            .push_opt("include_settings", options.include_settings)
            .push_opt("search", options.search.as_deref())
            .push_opt(START_PARAM, options.start.as_deref())
            .push_opt("user_id", options.user_id.as_deref());
        let url = self.service.url(&Self::users_path(&options.account_id), &query)?;

        let context = format!("users for account '{}'", options.account_id);
        let page: Option<UserList> = self.service.send_json(self.service.get(url), &context).await?;
        if let Some(p) = &page {
            debug!(
                "Fetched {} users (total: {:?})",
                p.resources.len(),
                p.total_results
            );
        }
        Ok(page)
    }

    /// Invite users to an account
    pub async fn invite_users(&self, options: &InviteUsersOptions) -> Result<Option<InvitedUserList>> {
        require("account_id", &options.account_id)?;
        let url = self
            .service
            .url(&Self::users_path(&options.account_id), &Query::new())?;
        let context = format!("invitation to account '{}'", options.account_id);
        self.service
            .send_json(self.service.post(url).json(options), &context)
            .await
    }

    /// Get a user's profile
    pub async fn get_user_profile(
        &self,
        account_id: &str,
        iam_id: &str,
        include_activity: Option<&str>,
    ) -> Result<Option<UserProfile>> {
        require("account_id", account_id)?;
        require("iam_id", iam_id)?;
        let mut query = Query::new();
        query.push_opt("include_activity", include_activity);
        let url = self.service.url(&Self::user_path(account_id, iam_id), &query)?;
        let context = format!("user '{}' in account '{}'", iam_id, account_id);
        self.service.send_json(self.service.get(url), &context).await
    }

    /// Update a user's profile
    pub async fn update_user_profile(&self, options: &UpdateUserProfileOptions) -> Result<()> {
        require("account_id", &options.account_id)?;
        require("iam_id", &options.iam_id)?;
        let mut query = Query::new();
        query.push_opt("include_activity", options.include_activity.as_deref());
        let url = self
            .service
            .url(&Self::user_path(&options.account_id, &options.iam_id), &query)?;
        let context = format!("profile of user '{}'", options.iam_id);
        self.service
            .send_empty(self.service.patch(url).json(options), &context)
            .await
    }

    /// Remove a user from an account
    pub async fn remove_user(
        &self,
        account_id: &str,
        iam_id: &str,
        include_activity: Option<&str>,
    ) -> Result<()> {
        require("account_id", account_id)?;
        require("iam_id", iam_id)?;
        let mut query = Query::new();
        query.push_opt("include_activity", include_activity);
        let url = self.service.url(&Self::user_path(account_id, iam_id), &query)?;
        let context = format!("user '{}' in account '{}'", iam_id, account_id);
        self.service.send_empty(self.service.delete(url), &context).await
    }

    /// Accept an invitation on behalf of the authenticated user
    ///
    /// Without an account ID the service picks the pending invitation itself.
    pub async fn accept(&self, account_id: Option<&str>) -> Result<()> {
        let url = self.service.url(api::ACCEPT, &Query::new())?;
        let body = match account_id {
            Some(id) => serde_json::json!({ "account_id": id }),
            None => serde_json::json!({}),
        };
        self.service
            .send_empty(self.service.post(url).json(&body), "invitation acceptance")
            .await
    }

    /// Remove a user through the v3 endpoint
    pub async fn v3_remove_user(&self, account_id: &str, iam_id: &str) -> Result<()> {
        require("account_id", account_id)?;
        require("iam_id", iam_id)?;
        let path = format!(
            "{}/{}/users/{}",
            api::ACCOUNTS_V3,
            segment(account_id),
            segment(iam_id)
        );
        let url = self.service.url(&path, &Query::new())?;
        let context = format!("user '{}' in account '{}'", iam_id, account_id);
        self.service.send_empty(self.service.delete(url), &context).await
    }

    /// Get a user's settings
    pub async fn get_user_settings(&self, account_id: &str, iam_id: &str) -> Result<Option<UserSettings>> {
        require("account_id", account_id)?;
        require("iam_id", iam_id)?;
        let path = format!("{}/settings", Self::user_path(account_id, iam_id));
        let url = self.service.url(&path, &Query::new())?;
        let context = format!("settings of user '{}'", iam_id);
        self.service.send_json(self.service.get(url), &context).await
    }

    /// Update a user's settings
    pub async fn update_user_settings(&self, options: &UpdateUserSettingsOptions) -> Result<()> {
        require("account_id", &options.account_id)?;
        require("iam_id", &options.iam_id)?;
        let path = format!(
            "{}/settings",
            Self::user_path(&options.account_id, &options.iam_id)
        );
        let url = self.service.url(&path, &Query::new())?;
        let context = format!("settings of user '{}'", options.iam_id);
        self.service
            .send_empty(self.service.patch(url).json(options), &context)
            .await
    }

    /// Pager over the users of an account
    pub fn new_users_pager(
        &self,
        options: &ListUsersOptions,
    ) -> Result<Pager<'_, Self, ListUsersOptions>> {
        Pager::new(self, options)
    }
}

impl PageFetcher<ListUsersOptions> for UserManagementV1 {
    type Page = UserList;

    async fn fetch_page(&self, request: &ListUsersOptions) -> Result<Option<UserList>> {
        self.list_users(request).await
    }
}
