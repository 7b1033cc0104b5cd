//! Usage Reports request options

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{PsError, Result};
use crate::ibm::traits::PagedRequest;

/// Billing month in `YYYY-MM` form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BillingMonth(String);

impl BillingMonth {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for BillingMonth {
    type Err = PsError;

    fn from_str(s: &str) -> Result<Self> {
        let valid = s.len() == 7
            && NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d").is_ok();
        if !valid {
            return Err(PsError::invalid(format!(
                "billing month '{}' must be in YYYY-MM format",
                s
            )));
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for BillingMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Frequency of report snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    Daily,
}

impl FromStr for Interval {
    type Err = PsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "daily" => Ok(Interval::Daily),
            other => Err(PsError::invalid(format!(
                "unknown interval '{}' (expected: daily)",
                other
            ))),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interval::Daily => write!(f, "daily"),
        }
    }
}

/// Whether new report files overwrite older ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Versioning {
    New,
    Overwrite,
}

impl FromStr for Versioning {
    type Err = PsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "new" => Ok(Versioning::New),
            "overwrite" => Ok(Versioning::Overwrite),
            other => Err(PsError::invalid(format!(
                "unknown versioning '{}' (expected: new, overwrite)",
                other
            ))),
        }
    }
}

impl fmt::Display for Versioning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Versioning::New => write!(f, "new"),
            Versioning::Overwrite => write!(f, "overwrite"),
        }
    }
}

/// Report written to the bucket by snapshot runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    AccountSummary,
    EnterpriseSummary,
    AccountResourceInstanceUsage,
}

impl FromStr for ReportType {
    type Err = PsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "account_summary" => Ok(ReportType::AccountSummary),
            "enterprise_summary" => Ok(ReportType::EnterpriseSummary),
            "account_resource_instance_usage" => Ok(ReportType::AccountResourceInstanceUsage),
            other => Err(PsError::invalid(format!("unknown report type '{}'", other))),
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportType::AccountSummary => write!(f, "account_summary"),
            ReportType::EnterpriseSummary => write!(f, "enterprise_summary"),
            ReportType::AccountResourceInstanceUsage => {
                write!(f, "account_resource_instance_usage")
            }
        }
    }
}

/// Options for `get_account_summary`
#[derive(Debug, Clone)]
pub struct GetAccountSummaryOptions {
    pub account_id: String,
    pub billing_month: BillingMonth,
}

impl GetAccountSummaryOptions {
    pub fn new(account_id: impl Into<String>, billing_month: BillingMonth) -> Self {
        Self {
            account_id: account_id.into(),
            billing_month,
        }
    }
}

/// Options shared by account, resource group and org usage lookups
///
/// `names` adds resource and plan names to the response; `accept_language`
/// selects their language.
#[derive(Debug, Clone)]
pub struct GetUsageOptions {
    pub account_id: String,
    pub billing_month: BillingMonth,
    pub names: Option<bool>,
    pub accept_language: Option<String>,
}

impl GetUsageOptions {
    pub fn new(account_id: impl Into<String>, billing_month: BillingMonth) -> Self {
        Self {
            account_id: account_id.into(),
            billing_month,
            names: None,
            accept_language: None,
        }
    }

    pub fn with_names(mut self, names: bool) -> Self {
        self.names = Some(names);
        self
    }

    pub fn with_accept_language(mut self, language: impl Into<String>) -> Self {
        self.accept_language = Some(language.into());
        self
    }
}

/// Filters shared by the resource instance usage lists
#[derive(Debug, Clone, Default)]
pub struct InstanceFilters {
    pub resource_instance_id: Option<String>,
    pub resource_id: Option<String>,
    pub plan_id: Option<String>,
    pub region: Option<String>,
}

/// Which part of the account a resource instance usage list covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsageScope {
    /// Whole account, optionally narrowed by group or org
    Account {
        resource_group_id: Option<String>,
        organization_id: Option<String>,
    },
    ResourceGroup(String),
    Organization(String),
}

/// Options for the paged resource instance usage lists
#[derive(Debug, Clone)]
pub struct GetResourceUsageOptions {
    pub account_id: String,
    pub billing_month: BillingMonth,
    pub scope: UsageScope,
    pub names: Option<bool>,
    pub tags: Option<bool>,
    pub accept_language: Option<String>,
    /// Page size, 1 to 30
    pub limit: Option<i64>,
    pub start: Option<String>,
    pub filters: InstanceFilters,
}

impl GetResourceUsageOptions {
    /// Usage across the whole account
    pub fn account(account_id: impl Into<String>, billing_month: BillingMonth) -> Self {
        Self::with_scope(
            account_id,
            billing_month,
            UsageScope::Account {
                resource_group_id: None,
                organization_id: None,
            },
        )
    }

    /// Usage within one resource group
    pub fn resource_group(
        account_id: impl Into<String>,
        resource_group_id: impl Into<String>,
        billing_month: BillingMonth,
    ) -> Self {
        Self::with_scope(
            account_id,
            billing_month,
            UsageScope::ResourceGroup(resource_group_id.into()),
        )
    }

    /// Usage within one Cloud Foundry organization
    pub fn organization(
        account_id: impl Into<String>,
        organization_id: impl Into<String>,
        billing_month: BillingMonth,
    ) -> Self {
        Self::with_scope(
            account_id,
            billing_month,
            UsageScope::Organization(organization_id.into()),
        )
    }

    fn with_scope(account_id: impl Into<String>, billing_month: BillingMonth, scope: UsageScope) -> Self {
        Self {
            account_id: account_id.into(),
            billing_month,
            scope,
            names: None,
            tags: None,
            accept_language: None,
            limit: None,
            start: None,
            filters: InstanceFilters::default(),
        }
    }

    pub fn with_names(mut self, names: bool) -> Self {
        self.names = Some(names);
        self
    }

    pub fn with_tags(mut self, tags: bool) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn with_accept_language(mut self, language: impl Into<String>) -> Self {
        self.accept_language = Some(language.into());
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_filters(mut self, filters: InstanceFilters) -> Self {
        self.filters = filters;
        self
    }
}

impl PagedRequest for GetResourceUsageOptions {
    fn start(&self) -> Option<&str> {
        self.start.as_deref()
    }

    fn set_start(&mut self, start: Option<String>) {
        self.start = start;
    }
}

/// Body for `create_reports_snapshot_config`
#[derive(Debug, Clone, Serialize)]
pub struct CreateReportsSnapshotConfigOptions {
    pub account_id: String,
    pub interval: Interval,
    pub cos_bucket: String,
    pub cos_location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cos_reports_folder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_types: Option<Vec<ReportType>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub versioning: Option<Versioning>,
}

impl CreateReportsSnapshotConfigOptions {
    pub fn new(
        account_id: impl Into<String>,
        interval: Interval,
        cos_bucket: impl Into<String>,
        cos_location: impl Into<String>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            interval,
            cos_bucket: cos_bucket.into(),
            cos_location: cos_location.into(),
            cos_reports_folder: None,
            report_types: None,
            versioning: None,
        }
    }

    pub fn with_cos_reports_folder(mut self, folder: impl Into<String>) -> Self {
        self.cos_reports_folder = Some(folder.into());
        self
    }

    pub fn with_report_types(mut self, report_types: Vec<ReportType>) -> Self {
        self.report_types = Some(report_types);
        self
    }

    pub fn with_versioning(mut self, versioning: Versioning) -> Self {
        self.versioning = Some(versioning);
        self
    }
}

/// Body for `update_reports_snapshot_config` and `validate_reports_snapshot_config`
///
/// Only fields that are set are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateReportsSnapshotConfigOptions {
    pub account_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<Interval>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cos_bucket: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cos_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cos_reports_folder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_types: Option<Vec<ReportType>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub versioning: Option<Versioning>,
}

impl UpdateReportsSnapshotConfigOptions {
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            ..Default::default()
        }
    }
}

pub type ValidateReportsSnapshotConfigOptions = UpdateReportsSnapshotConfigOptions;

/// Options for the paged snapshot list
#[derive(Debug, Clone)]
pub struct GetReportsSnapshotOptions {
    pub account_id: String,
    pub month: BillingMonth,
    /// Epoch milliseconds
    pub date_from: Option<i64>,
    /// Epoch milliseconds
    pub date_to: Option<i64>,
    pub limit: Option<i64>,
    pub start: Option<String>,
}

impl GetReportsSnapshotOptions {
    pub fn new(account_id: impl Into<String>, month: BillingMonth) -> Self {
        Self {
            account_id: account_id.into(),
            month,
            date_from: None,
            date_to: None,
            limit: None,
            start: None,
        }
    }

    pub fn with_date_range(mut self, date_from: Option<i64>, date_to: Option<i64>) -> Self {
        self.date_from = date_from;
        self.date_to = date_to;
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl PagedRequest for GetReportsSnapshotOptions {
    fn start(&self) -> Option<&str> {
        self.start.as_deref()
    }

    fn set_start(&mut self, start: Option<String>) {
        self.start = start;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_billing_month_valid() {
        let month: BillingMonth = "2023-02".parse().unwrap();
        assert_eq!(month.as_str(), "2023-02");
        assert_eq!(month.to_string(), "2023-02");
    }

    #[test]
    fn test_billing_month_invalid() {
        for bad in ["2023-13", "2023-2", "202302", "2023-02-01", "", "abcd-ef"] {
            assert!(
                matches!(bad.parse::<BillingMonth>(), Err(PsError::InvalidArgument(_))),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_report_type_round_trip_names() {
        for name in [
            "account_summary",
            "enterprise_summary",
            "account_resource_instance_usage",
        ] {
            let parsed: ReportType = name.parse().unwrap();
            assert_eq!(parsed.to_string(), name);
            assert_eq!(serde_json::to_value(parsed).unwrap(), name);
        }
        assert!("usage".parse::<ReportType>().is_err());
    }

    #[test]
    fn test_interval_and_versioning_reject_unknown() {
        assert_eq!("daily".parse::<Interval>().unwrap(), Interval::Daily);
        assert!("weekly".parse::<Interval>().is_err());
        assert_eq!("overwrite".parse::<Versioning>().unwrap(), Versioning::Overwrite);
        assert!("NEW".parse::<Versioning>().is_err());
    }

    #[test]
    fn test_create_body_skips_unset() {
        let options =
            CreateReportsSnapshotConfigOptions::new("abc", Interval::Daily, "bucket_name", "us-south");
        let body = serde_json::to_value(&options).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "account_id": "abc",
                "interval": "daily",
                "cos_bucket": "bucket_name",
                "cos_location": "us-south"
            })
        );
    }

    #[test]
    fn test_update_body_keeps_explicit_empty() {
        let mut options = UpdateReportsSnapshotConfigOptions::new("abc");
        options.cos_reports_folder = Some(String::new());
        options.versioning = Some(Versioning::New);
        let body = serde_json::to_value(&options).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"account_id": "abc", "cos_reports_folder": "", "versioning": "new"})
        );
    }

    #[test]
    fn test_resource_usage_scopes() {
        let month: BillingMonth = "2023-02".parse().unwrap();
        let options = GetResourceUsageOptions::resource_group("acc", "rg", month.clone());
        assert_eq!(options.scope, UsageScope::ResourceGroup("rg".to_string()));
        let options = GetResourceUsageOptions::account("acc", month).with_limit(30);
        assert_eq!(options.limit, Some(30));
        assert!(options.start().is_none());
    }
}
