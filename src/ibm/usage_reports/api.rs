//! Usage Reports v4 API operations

use log::debug;

use crate::config::api::{usage_reports as api, START_PARAM};
use crate::error::{PsError, Result};
use crate::ibm::traits::PageFetcher;
use crate::ibm::{require, segment, Pager, Query, ServiceClient, ServiceOptions};

use super::models::{
    AccountSummary, AccountUsage, InstancesUsage, OrgUsage, ResourceGroupUsage, SnapshotConfig,
    SnapshotConfigValidateResponse, SnapshotList,
};
use super::options::{
    CreateReportsSnapshotConfigOptions, GetAccountSummaryOptions, GetReportsSnapshotOptions,
    GetResourceUsageOptions, GetUsageOptions, UpdateReportsSnapshotConfigOptions, UsageScope,
    ValidateReportsSnapshotConfigOptions,
};

/// Client for the Usage Reports v4 service
#[derive(Debug, Clone)]
pub struct UsageReportsV4 {
    service: ServiceClient,
}

impl UsageReportsV4 {
    /// Create a client; `options.url` defaults to the public billing endpoint
    pub fn new(options: ServiceOptions) -> Result<Self> {
        Ok(Self {
            service: ServiceClient::new(options, api::DEFAULT_URL)?,
        })
    }

    /// Create a client from `USAGE_REPORTS_*` environment variables or a credentials file
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

    fn usage_path(account_id: &str, scope: &str, billing_month: &str) -> String {
        format!(
            "{}/{}{}/{}",
            api::ACCOUNTS,
            segment(account_id),
            scope,
            segment(billing_month)
        )
    }

    /// Get the account summary for a billing month
    pub async fn get_account_summary(
        &self,
        options: &GetAccountSummaryOptions,
    ) -> Result<Option<AccountSummary>> {
        require("account_id", &options.account_id)?;
        let path = Self::usage_path(
            &options.account_id,
            "/summary",
            options.billing_month.as_str(),
        );
        let url = self.service.url(&path, &Query::new())?;
        let context = format!(
            "account summary for '{}' ({})",
            options.account_id, options.billing_month
        );
        self.service.send_json(self.service.get(url), &context).await
    }

    /// Get account usage for a billing month
    pub async fn get_account_usage(&self, options: &GetUsageOptions) -> Result<Option<AccountUsage>> {
        require("account_id", &options.account_id)?;
        let path = Self::usage_path(&options.account_id, "/usage", options.billing_month.as_str());
        let context = format!("account usage for '{}'", options.account_id);
        self.fetch_usage(&path, options, &context).await
    }

    /// Get resource group usage for a billing month
    pub async fn get_resource_group_usage(
        &self,
        options: &GetUsageOptions,
        resource_group_id: &str,
    ) -> Result<Option<ResourceGroupUsage>> {
        require("account_id", &options.account_id)?;
        require("resource_group_id", resource_group_id)?;
        let scope = format!("/resource_groups/{}/usage", segment(resource_group_id));
        let path = Self::usage_path(&options.account_id, &scope, options.billing_month.as_str());
        let context = format!("usage for resource group '{}'", resource_group_id);
        self.fetch_usage(&path, options, &context).await
    }

    /// Get Cloud Foundry organization usage for a billing month
    pub async fn get_org_usage(
        &self,
        options: &GetUsageOptions,
        organization_id: &str,
    ) -> Result<Option<OrgUsage>> {
        require("account_id", &options.account_id)?;
        require("organization_id", organization_id)?;
        let scope = format!("/organizations/{}/usage", segment(organization_id));
        let path = Self::usage_path(&options.account_id, &scope, options.billing_month.as_str());
        let context = format!("usage for organization '{}'", organization_id);
        self.fetch_usage(&path, options, &context).await
    }

    async fn fetch_usage<T>(&self, path: &str, options: &GetUsageOptions, context: &str) -> Result<Option<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        let mut query = Query::new();
        query.push_opt("_names", options.names);
        let url = self.service.url(path, &query)?;

        let mut request = self.service.get(url);
        if let Some(language) = &options.accept_language {
            request = request.header("Accept-Language", language);
        }
        self.service.send_json(request, context).await
    }

    /// Get one page of resource instance usage across an account
    ///
    /// `options.scope` must be `UsageScope::Account`.
    pub async fn get_resource_usage_account(
        &self,
        options: &GetResourceUsageOptions,
    ) -> Result<Option<InstancesUsage>> {
        expect_scope(options, "account")?;
        self.get_resource_usage(options).await
    }

    /// Get one page of resource instance usage in a resource group
    pub async fn get_resource_usage_resource_group(
        &self,
        options: &GetResourceUsageOptions,
    ) -> Result<Option<InstancesUsage>> {
        expect_scope(options, "resource_group")?;
        self.get_resource_usage(options).await
    }

    /// Get one page of resource instance usage in a Cloud Foundry organization
    pub async fn get_resource_usage_org(
        &self,
        options: &GetResourceUsageOptions,
    ) -> Result<Option<InstancesUsage>> {
        expect_scope(options, "organization")?;
        self.get_resource_usage(options).await
    }

    /// Get one page of resource instance usage for any scope
    pub async fn get_resource_usage(
        &self,
        options: &GetResourceUsageOptions,
    ) -> Result<Option<InstancesUsage>> {
        require("account_id", &options.account_id)?;

        let mut query = Query::new();
        query
            .push_opt("_names", options.names)
            .push_opt("_tags", options.tags)
            .push_opt("_limit", options.limit)
            .push_opt(START_PARAM, options.start.as_deref());

        let scope = match &options.scope {
            UsageScope::Account {
                resource_group_id,
                organization_id,
            } => {
                query
                    .push_opt("resource_group_id", resource_group_id.as_deref())
                    .push_opt("organization_id", organization_id.as_deref());
                "/resource_instances/usage".to_string()
            }
            UsageScope::ResourceGroup(id) => {
                require("resource_group_id", id)?;
                format!("/resource_groups/{}/resource_instances/usage", segment(id))
            }
            UsageScope::Organization(id) => {
                require("organization_id", id)?;
                format!("/organizations/{}/resource_instances/usage", segment(id))
            }
        };

        let filters = &options.filters;
        query
            .push_opt("resource_instance_id", filters.resource_instance_id.as_deref())
            .push_opt("resource_id", filters.resource_id.as_deref())
            .push_opt("plan_id", filters.plan_id.as_deref())
            .push_opt("region", filters.region.as_deref());

        let path = Self::usage_path(&options.account_id, &scope, options.billing_month.as_str());
        let url = self.service.url(&path, &query)?;

        let mut request = self.service.get(url);
        if let Some(language) = &options.accept_language {
            request = request.header("Accept-Language", language);
        }

        let context = format!("resource instance usage for account '{}'", options.account_id);
        let page: Option<InstancesUsage> = self.service.send_json(request, &context).await?;
        if let Some(p) = &page {
            debug!("Fetched {} resource instance usage records", p.resources.len());
        }
        Ok(page)
    }

    /// Enable billing report snapshots for an account
    pub async fn create_reports_snapshot_config(
        &self,
        options: &CreateReportsSnapshotConfigOptions,
    ) -> Result<Option<SnapshotConfig>> {
        require("account_id", &options.account_id)?;
        require("cos_bucket", &options.cos_bucket)?;
        require("cos_location", &options.cos_location)?;

        let url = self.service.url(api::SNAPSHOT_CONFIG, &Query::new())?;
        let context = format!("snapshot config for account '{}'", options.account_id);
        self.service
            .send_json(self.service.post(url).json(options), &context)
            .await
    }

    /// Get the snapshot configuration of an account
    pub async fn get_reports_snapshot_config(&self, account_id: &str) -> Result<Option<SnapshotConfig>> {
        require("account_id", account_id)?;
        let mut query = Query::new();
        query.push("account_id", account_id);
        let url = self.service.url(api::SNAPSHOT_CONFIG, &query)?;
        let context = format!("snapshot config for account '{}'", account_id);
        self.service.send_json(self.service.get(url), &context).await
    }

    /// Update the snapshot configuration; unset fields are left unchanged
    pub async fn update_reports_snapshot_config(
        &self,
        options: &UpdateReportsSnapshotConfigOptions,
    ) -> Result<Option<SnapshotConfig>> {
        require("account_id", &options.account_id)?;
        let url = self.service.url(api::SNAPSHOT_CONFIG, &Query::new())?;
        let context = format!("snapshot config for account '{}'", options.account_id);
        self.service
            .send_json(self.service.patch(url).json(options), &context)
            .await
    }

    /// Disable billing report snapshots for an account
    pub async fn delete_reports_snapshot_config(&self, account_id: &str) -> Result<()> {
        require("account_id", account_id)?;
        let mut query = Query::new();
        query.push("account_id", account_id);
        let url = self.service.url(api::SNAPSHOT_CONFIG, &query)?;
        let context = format!("snapshot config for account '{}'", account_id);
        self.service.send_empty(self.service.delete(url), &context).await
    }

    /// Check that the service can write to the configured bucket
    pub async fn validate_reports_snapshot_config(
        &self,
        options: &ValidateReportsSnapshotConfigOptions,
    ) -> Result<Option<SnapshotConfigValidateResponse>> {
        require("account_id", &options.account_id)?;
        let path = format!("{}/validate", api::SNAPSHOT_CONFIG);
        let url = self.service.url(&path, &Query::new())?;
        let context = format!("snapshot config validation for account '{}'", options.account_id);
        self.service
            .send_json(self.service.post(url).json(options), &context)
            .await
    }

    /// Get one page of billing report snapshots
    pub async fn get_reports_snapshot(
        &self,
        options: &GetReportsSnapshotOptions,
    ) -> Result<Option<SnapshotList>> {
        require("account_id", &options.account_id)?;

        let mut query = Query::new();
        query
            .push("account_id", &options.account_id)
            .push("month", &options.month)
            .push_opt("date_from", options.date_from)
            .push_opt("date_to", options.date_to)
            .push_opt("_limit", options.limit)
            .push_opt(START_PARAM, options.start.as_deref());
        let url = self.service.url(api::SNAPSHOTS, &query)?;

        let context = format!("snapshots for account '{}'", options.account_id);
        let page: Option<SnapshotList> = self.service.send_json(self.service.get(url), &context).await?;
        if let Some(p) = &page {
            debug!("Fetched {} snapshots", p.snapshots.len());
        }
        Ok(page)
    }

    /// Pager over resource instance usage across an account
    pub fn new_resource_usage_account_pager(
        &self,
        options: &GetResourceUsageOptions,
    ) -> Result<Pager<'_, Self, GetResourceUsageOptions>> {
        expect_scope(options, "account")?;
        Pager::new(self, options)
    }

    /// Pager over resource instance usage in a resource group
    pub fn new_resource_usage_resource_group_pager(
        &self,
        options: &GetResourceUsageOptions,
    ) -> Result<Pager<'_, Self, GetResourceUsageOptions>> {
        expect_scope(options, "resource_group")?;
        Pager::new(self, options)
    }

    /// Pager over resource instance usage in a Cloud Foundry organization
    pub fn new_resource_usage_org_pager(
        &self,
        options: &GetResourceUsageOptions,
    ) -> Result<Pager<'_, Self, GetResourceUsageOptions>> {
        expect_scope(options, "organization")?;
        Pager::new(self, options)
    }

    /// Pager over billing report snapshots
    pub fn new_reports_snapshot_pager(
        &self,
        options: &GetReportsSnapshotOptions,
    ) -> Result<Pager<'_, Self, GetReportsSnapshotOptions>> {
        Pager::new(self, options)
    }
}

fn expect_scope(options: &GetResourceUsageOptions, expected: &str) -> Result<()> {
    let actual = match options.scope {
        UsageScope::Account { .. } => "account",
        UsageScope::ResourceGroup(_) => "resource_group",
        UsageScope::Organization(_) => "organization",
    };
    if actual != expected {
        return Err(PsError::invalid(format!(
            "expected {} scope, got {} scope",
            expected, actual
        )));
    }
    Ok(())
}

impl PageFetcher<GetResourceUsageOptions> for UsageReportsV4 {
    type Page = InstancesUsage;

    async fn fetch_page(&self, request: &GetResourceUsageOptions) -> Result<Option<InstancesUsage>> {
        self.get_resource_usage(request).await
    }
}

impl PageFetcher<GetReportsSnapshotOptions> for UsageReportsV4 {
    type Page = SnapshotList;

    async fn fetch_page(&self, request: &GetReportsSnapshotOptions) -> Result<Option<SnapshotList>> {
        self.get_reports_snapshot(request).await
    }
}
