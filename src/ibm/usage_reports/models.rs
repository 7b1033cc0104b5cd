//! Usage Reports data models

use serde::{Deserialize, Serialize};

use crate::ibm::traits::Page;
use crate::ibm::PageLink;

/// Account summary for a billing month
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct AccountSummary {
    pub account_id: Option<String>,
    #[serde(default)]
    pub account_resources: Vec<Resource>,
    pub month: Option<String>,
    pub billing_country_code: Option<String>,
    pub billing_currency_code: Option<String>,
    pub resources: Option<ResourcesSummary>,
    #[serde(default)]
    pub offers: Vec<Offer>,
    #[serde(default)]
    pub support: Vec<SupportSummary>,
    #[serde(default)]
    pub support_resources: Vec<serde_json::Value>,
    pub subscription: Option<SubscriptionSummary>,
}

/// Billable and non-billable totals
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct ResourcesSummary {
    pub billable_cost: Option<f64>,
    pub non_billable_cost: Option<f64>,
}

/// Aggregated usage of one resource
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Resource {
    pub resource_id: Option<String>,
    pub catalog_id: Option<String>,
    pub resource_name: Option<String>,
    pub billable_cost: Option<f64>,
    pub billable_rated_cost: Option<f64>,
    pub non_billable_cost: Option<f64>,
    pub non_billable_rated_cost: Option<f64>,
    #[serde(default)]
    pub plans: Vec<Plan>,
    #[serde(default)]
    pub discounts: Vec<Discount>,
}

/// Usage aggregated under one pricing plan
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Plan {
    pub plan_id: Option<String>,
    pub plan_name: Option<String>,
    pub pricing_region: Option<String>,
    pub pricing_plan_id: Option<String>,
    pub billable: Option<bool>,
    pub cost: Option<f64>,
    pub rated_cost: Option<f64>,
    pub subscription_id: Option<String>,
    #[serde(default)]
    pub usage: Vec<Metric>,
    #[serde(default)]
    pub discounts: Vec<Discount>,
    pub pending: Option<bool>,
}

/// Usage of one metric
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Metric {
    pub metric: Option<String>,
    pub metric_name: Option<String>,
    pub quantity: Option<f64>,
    pub rateable_quantity: Option<f64>,
    pub cost: Option<f64>,
    pub rated_cost: Option<f64>,
    #[serde(default)]
    pub price: Vec<serde_json::Value>,
    pub unit: Option<String>,
    pub unit_name: Option<String>,
    pub non_chargeable: Option<bool>,
    #[serde(default)]
    pub discounts: Vec<Discount>,
    pub volume_discount: Option<f64>,
    pub volume_cost: Option<f64>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Discount {
    #[serde(rename = "ref")]
    pub discount_ref: Option<String>,
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub discount: Option<f64>,
}

/// Promotional credit offer
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Offer {
    pub offer_id: Option<String>,
    pub credits_total: Option<f64>,
    pub offer_template: Option<String>,
    pub valid_from: Option<String>,
    pub created_by_email_id: Option<String>,
    pub expires_on: Option<String>,
    pub credits: Option<OfferCredits>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct OfferCredits {
    pub starting_balance: Option<f64>,
    pub used: Option<f64>,
    pub balance: Option<f64>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SupportSummary {
    pub cost: Option<f64>,
    #[serde(rename = "type")]
    pub support_type: Option<String>,
    pub overage: Option<f64>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SubscriptionSummary {
    pub overage: Option<f64>,
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Subscription {
    pub subscription_id: Option<String>,
    pub charge_agreement_number: Option<String>,
    #[serde(rename = "type")]
    pub subscription_type: Option<String>,
    pub subscription_amount: Option<f64>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub credits_total: Option<f64>,
    #[serde(default)]
    pub terms: Vec<SubscriptionTerm>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SubscriptionTerm {
    pub start: Option<String>,
    pub end: Option<String>,
    pub credits: Option<SubscriptionTermCredits>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SubscriptionTermCredits {
    pub total: Option<f64>,
    pub starting_balance: Option<f64>,
    pub used: Option<f64>,
    pub balance: Option<f64>,
}

/// Resource usage of an account
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct AccountUsage {
    pub account_id: Option<String>,
    pub pricing_country: Option<String>,
    pub currency_code: Option<String>,
    pub month: Option<String>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    pub currency_rate: Option<f64>,
}

/// Resource usage of a resource group
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct ResourceGroupUsage {
    pub account_id: Option<String>,
    pub resource_group_id: Option<String>,
    pub resource_group_name: Option<String>,
    pub pricing_country: Option<String>,
    pub currency_code: Option<String>,
    pub month: Option<String>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    pub currency_rate: Option<f64>,
}

/// Resource usage of a Cloud Foundry organization
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct OrgUsage {
    pub account_id: Option<String>,
    pub organization_id: Option<String>,
    pub organization_name: Option<String>,
    pub pricing_country: Option<String>,
    pub currency_code: Option<String>,
    pub month: Option<String>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    pub currency_rate: Option<f64>,
}

/// One page of resource instance usage
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct InstancesUsage {
    pub limit: Option<i64>,
    pub count: Option<i64>,
    pub first: Option<PageLink>,
    pub next: Option<PageLink>,
    #[serde(default)]
    pub resources: Vec<InstanceUsage>,
}

impl Page for InstancesUsage {
    type Item = InstanceUsage;

    fn next_link(&self) -> Option<&str> {
        self.next.as_ref().and_then(|n| n.href.as_deref())
    }

    fn into_items(self) -> Vec<InstanceUsage> {
        self.resources
    }
}

/// Usage of one resource instance
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct InstanceUsage {
    pub account_id: Option<String>,
    pub resource_instance_id: Option<String>,
    pub resource_instance_name: Option<String>,
    pub resource_id: Option<String>,
    pub catalog_id: Option<String>,
    pub resource_name: Option<String>,
    pub resource_group_id: Option<String>,
    pub resource_group_name: Option<String>,
    pub organization_id: Option<String>,
    pub organization_name: Option<String>,
    pub space_id: Option<String>,
    pub space_name: Option<String>,
    pub consumer_id: Option<String>,
    pub region: Option<String>,
    pub pricing_region: Option<String>,
    pub pricing_country: Option<String>,
    pub currency_code: Option<String>,
    pub billable: Option<bool>,
    pub parent_resource_instance_id: Option<String>,
    pub plan_id: Option<String>,
    pub plan_name: Option<String>,
    pub pricing_plan_id: Option<String>,
    pub subscription_id: Option<String>,
    pub created_at: Option<String>,
    pub deleted_at: Option<String>,
    pub month: Option<String>,
    #[serde(default)]
    pub usage: Vec<Metric>,
    pub pending: Option<bool>,
    pub currency_rate: Option<f64>,
    #[serde(default)]
    pub tags: Vec<serde_json::Value>,
    #[serde(default)]
    pub service_tags: Vec<serde_json::Value>,
}

impl InstanceUsage {
    /// Sum of metric costs, zero when none are reported
    pub fn total_cost(&self) -> f64 {
        self.usage.iter().filter_map(|m| m.cost).sum()
    }
}

/// Billing report snapshot configuration of an account
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SnapshotConfig {
    pub account_id: Option<String>,
    pub state: Option<String>,
    pub account_type: Option<String>,
    pub interval: Option<String>,
    pub versioning: Option<String>,
    #[serde(default)]
    pub report_types: Vec<String>,
    pub compression: Option<String>,
    pub content_type: Option<String>,
    pub cos_reports_folder: Option<String>,
    pub cos_bucket: Option<String>,
    pub cos_location: Option<String>,
    pub cos_endpoint: Option<String>,
    /// Epoch milliseconds
    pub created_at: Option<i64>,
    /// Epoch milliseconds
    pub last_updated_at: Option<i64>,
    #[serde(default)]
    pub history: Vec<SnapshotConfigHistoryItem>,
}

/// Past revision of a snapshot configuration
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SnapshotConfigHistoryItem {
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub updated_by: Option<String>,
    pub account_id: Option<String>,
    pub state: Option<String>,
    pub account_type: Option<String>,
    pub interval: Option<String>,
    pub versioning: Option<String>,
    #[serde(default)]
    pub report_types: Vec<String>,
    pub compression: Option<String>,
    pub content_type: Option<String>,
    pub cos_reports_folder: Option<String>,
    pub cos_bucket: Option<String>,
    pub cos_location: Option<String>,
    pub cos_endpoint: Option<String>,
}

/// Result of validating bucket access
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SnapshotConfigValidateResponse {
    pub account_id: Option<String>,
    pub cos_bucket: Option<String>,
    pub cos_location: Option<String>,
}

/// One page of billing report snapshots
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SnapshotList {
    pub count: Option<i64>,
    pub first: Option<PageLink>,
    pub next: Option<PageLink>,
    #[serde(default)]
    pub snapshots: Vec<Snapshot>,
}

impl Page for SnapshotList {
    type Item = Snapshot;

    fn next_link(&self) -> Option<&str> {
        self.next.as_ref().and_then(|n| n.href.as_deref())
    }

    fn into_items(self) -> Vec<Snapshot> {
        self.snapshots
    }
}

/// Billing report snapshot
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Snapshot {
    pub account_id: Option<String>,
    pub month: Option<String>,
    pub account_type: Option<String>,
    pub expected_processed_at: Option<i64>,
    pub state: Option<String>,
    pub billing_period: Option<BillingPeriod>,
    pub snapshot_id: Option<String>,
    pub charset: Option<String>,
    pub compression: Option<String>,
    pub content_type: Option<String>,
    pub bucket: Option<String>,
    pub version: Option<String>,
    pub created_on: Option<String>,
    #[serde(default)]
    pub report_types: Vec<SnapshotReportType>,
    #[serde(default)]
    pub files: Vec<SnapshotFile>,
    pub processed_at: Option<i64>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct BillingPeriod {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SnapshotReportType {
    #[serde(rename = "type")]
    pub report_type: Option<String>,
    pub version: Option<String>,
}

/// Report file stored in the COS bucket
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SnapshotFile {
    pub report_types: Option<String>,
    pub location: Option<String>,
    pub account_id: Option<String>,
}
