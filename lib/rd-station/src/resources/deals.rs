//! Deals: records and operations.

#![allow(missing_docs)]

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Direction;
use crate::{CallContext, EndpointTemplate, HttpClient, Query, RdStationClient, Result};

const DEALS: EndpointTemplate = EndpointTemplate::new("deals");
const DEAL_BY_ID: EndpointTemplate = EndpointTemplate::new("deals/{id}");

// ============================================================================
// Response records
// ============================================================================

/// A deal as listed by `GET /deals`.
///
/// Fields missing from the payload, or `null`, take their default value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Deal {
    #[serde(deserialize_with = "super::null_default")]
    pub id: String,
    #[serde(deserialize_with = "super::null_default")]
    pub name: String,
    /// Spelled as the API spells it.
    #[serde(rename = "amount_montly", deserialize_with = "super::null_default")]
    pub amount_monthly: f64,
    #[serde(deserialize_with = "super::null_default")]
    pub amount_total: f64,
    #[serde(deserialize_with = "super::null_default")]
    pub amount_unique: f64,
    pub closed_at: Option<String>,
    #[serde(deserialize_with = "super::null_default")]
    pub created_at: String,
    #[serde(deserialize_with = "super::null_default")]
    pub updated_at: String,
    #[serde(deserialize_with = "super::null_default")]
    pub deal_custom_fields: Vec<Value>,
    #[serde(deserialize_with = "super::null_default")]
    pub deal_products: Vec<DealProduct>,
    #[serde(deserialize_with = "super::null_default")]
    pub deal_stage: DealStage,
    pub hold: Option<String>,
    #[serde(deserialize_with = "super::null_default")]
    pub interactions: i64,
    pub last_activity_at: Option<String>,
    pub last_activity_content: Option<String>,
    #[serde(deserialize_with = "super::null_default")]
    pub markup: String,
    #[serde(deserialize_with = "super::null_default")]
    pub markup_created: String,
    #[serde(deserialize_with = "super::null_default")]
    pub markup_last_activities: String,
    pub prediction_date: Option<String>,
    #[serde(deserialize_with = "super::null_default")]
    pub rating: i64,
    pub stop_time_limit: Value,
    #[serde(deserialize_with = "super::null_default")]
    pub user: User,
    #[serde(deserialize_with = "super::null_default")]
    pub user_changed: bool,
    pub win: Option<Value>,
}

/// A product attached to a deal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DealProduct {
    #[serde(deserialize_with = "super::null_default")]
    pub id: String,
    #[serde(deserialize_with = "super::null_default")]
    pub product_id: String,
    #[serde(deserialize_with = "super::null_default")]
    pub name: String,
    #[serde(deserialize_with = "super::null_default")]
    pub description: String,
    #[serde(deserialize_with = "super::null_default")]
    pub amount: i64,
    #[serde(deserialize_with = "super::null_default")]
    pub base_price: f64,
    #[serde(deserialize_with = "super::null_default")]
    pub price: f64,
    #[serde(deserialize_with = "super::null_default")]
    pub discount: f64,
    #[serde(deserialize_with = "super::null_default")]
    pub discount_type: String,
    #[serde(deserialize_with = "super::null_default")]
    pub recurrence: String,
    #[serde(deserialize_with = "super::null_default")]
    pub total: f64,
    #[serde(deserialize_with = "super::null_default")]
    pub created_at: String,
    #[serde(deserialize_with = "super::null_default")]
    pub updated_at: String,
}

/// A pipeline stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DealStage {
    #[serde(rename = "_id", deserialize_with = "super::null_default")]
    pub internal_id: String,
    #[serde(deserialize_with = "super::null_default")]
    pub id: String,
    #[serde(deserialize_with = "super::null_default")]
    pub name: String,
    #[serde(deserialize_with = "super::null_default")]
    pub nickname: String,
    #[serde(deserialize_with = "super::null_default")]
    pub deal_pipeline_id: String,
    #[serde(deserialize_with = "super::null_default")]
    pub created_at: String,
    #[serde(deserialize_with = "super::null_default")]
    pub updated_at: String,
}

/// The user owning a deal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(rename = "_id", deserialize_with = "super::null_default")]
    pub internal_id: String,
    #[serde(deserialize_with = "super::null_default")]
    pub id: String,
    #[serde(deserialize_with = "super::null_default")]
    pub name: String,
    #[serde(deserialize_with = "super::null_default")]
    pub nickname: String,
    #[serde(deserialize_with = "super::null_default")]
    pub email: String,
}

/// Page of deals returned by [`RdStationClient::list_deals`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListDealsResponse {
    #[serde(deserialize_with = "super::null_default")]
    pub deals: Vec<Deal>,
    #[serde(deserialize_with = "super::null_default")]
    pub has_more: bool,
    /// Cursor to pass as [`ListDealsFilter::next_page`].
    pub next_page: Option<String>,
    #[serde(deserialize_with = "super::null_default")]
    pub total: i64,
}

/// A deal as returned by creation and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DealResponse {
    #[serde(deserialize_with = "super::null_default")]
    pub id: String,
    #[serde(deserialize_with = "super::null_default")]
    pub name: String,
    #[serde(rename = "amount_montly", deserialize_with = "super::null_default")]
    pub amount_monthly: f64,
    #[serde(deserialize_with = "super::null_default")]
    pub amount_total: f64,
    #[serde(deserialize_with = "super::null_default")]
    pub amount_unique: f64,
    pub campaign: Option<NamedRef>,
    pub campaign_id: Option<String>,
    pub closed_at: Option<String>,
    #[serde(deserialize_with = "super::null_default")]
    pub created_at: String,
    #[serde(deserialize_with = "super::null_default")]
    pub updated_at: String,
    #[serde(deserialize_with = "super::null_default")]
    pub deal_custom_fields: Vec<DealCustomField>,
    pub deal_lost_note: Option<String>,
    pub deal_lost_reason_id: Option<String>,
    #[serde(deserialize_with = "super::null_default")]
    pub deal_products: Vec<DealProduct>,
    pub deal_source: Option<DealSource>,
    pub deal_stage: Option<DealStage>,
    #[serde(deserialize_with = "super::null_default")]
    pub deal_stage_histories: Vec<DealStageHistory>,
    pub hold: Option<String>,
    #[serde(deserialize_with = "super::null_default")]
    pub interactions: i64,
    pub last_note_content: Option<String>,
    pub organization: Option<Value>,
    pub prediction_date: Option<String>,
    pub rating: Option<f64>,
    pub resume: Option<String>,
    pub stop_time_limit: Option<StopTimeLimit>,
    pub url: Option<String>,
    pub user: Option<NamedRef>,
    pub visible: Option<bool>,
    pub win: Option<Value>,
    /// Validation messages, when the API reports some.
    pub errors: Option<Map<String, Value>>,
}

/// An `{id, name}` reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamedRef {
    #[serde(deserialize_with = "super::null_default")]
    pub id: String,
    #[serde(deserialize_with = "super::null_default")]
    pub name: String,
}

/// A custom field value on a deal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DealCustomField {
    #[serde(deserialize_with = "super::null_default")]
    pub custom_field_id: String,
    pub value: Value,
    #[serde(deserialize_with = "super::null_default")]
    pub created_at: String,
    #[serde(deserialize_with = "super::null_default")]
    pub updated_at: String,
}

/// Where a deal comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DealSource {
    #[serde(deserialize_with = "super::null_default")]
    pub id: String,
    #[serde(deserialize_with = "super::null_default")]
    pub name: String,
    #[serde(deserialize_with = "super::null_default")]
    pub deal_source_id: String,
}

/// One stage a deal went through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DealStageHistory {
    #[serde(deserialize_with = "super::null_default")]
    pub id: String,
    #[serde(deserialize_with = "super::null_default")]
    pub deal_stage_id: String,
    #[serde(deserialize_with = "super::null_default")]
    pub start_date: String,
    pub end_date: Option<String>,
}

/// Time limit before a deal goes stale in its stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StopTimeLimit {
    pub expiration_date_time: Option<String>,
    pub expired: Option<bool>,
    pub expired_days: Option<i64>,
}

// ============================================================================
// Filter
// ============================================================================

/// Query of `GET /deals`. Empty and zero fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Query)]
pub struct ListDealsFilter {
    pub page: u32,
    /// Page size, 20 by default and at most 200.
    pub limit: u32,
    /// Sort field, `created_at` by default.
    pub order: String,
    pub direction: Option<Direction>,
    /// Partial name match.
    pub name: String,
    /// Send `name` as an exact match instead.
    pub exact_name: bool,
    /// `true`, `false`, or `null` for open deals.
    pub win: String,
    pub user_id: String,
    pub closed_at: String,
    pub closed_at_period: String,
    pub created_at_period: String,
    pub prediction_date_period: String,
    pub start_date: String,
    pub end_date: String,
    pub campaign_id: String,
    pub deal_stage_id: String,
    pub deal_lost_reason_id: String,
    pub deal_pipeline_id: String,
    pub organization: String,
    pub hold: String,
    pub product_presence: String,
    /// Cursor from [`ListDealsResponse::next_page`].
    pub next_page: String,
}

// ============================================================================
// Payloads
// ============================================================================

/// Body of `POST /deals`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateDealRequest {
    pub deal: CreateDealData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign: Option<CampaignData>,
}

/// The deal to create. Unset options are left out of the payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateDealData {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal_stage_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal_custom_fields: Option<Vec<CustomFieldValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal_products: Option<Vec<DealProductData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal_source: Option<DealSourceData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contacts: Option<Vec<Value>>,
}

/// A product line of a new deal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DealProductData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
}

/// Source of a deal, with optional distribution settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealSourceData {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal_stage_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution_settings: Option<DistributionSettings>,
}

/// Who receives a new deal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<Owner>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<IdRef>,
}

/// Deal owner selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// An `{_id}` reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRef {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Campaign of a new or updated deal.
pub type CampaignData = IdRef;

/// A custom field value to set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomFieldValue {
    pub custom_field_id: String,
    pub value: Value,
}

/// Body of `PUT /deals/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateDealRequest {
    pub deal: UpdateDealData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign: Option<CampaignData>,
}

/// Partial update of a deal: only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateDealData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal_stage_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hold: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub win: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal_lost_note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal_lost_reason_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal_custom_fields: Option<Vec<CustomFieldValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal_source: Option<DealSourceData>,
}

// ============================================================================
// Operations
// ============================================================================

impl<C: HttpClient> RdStationClient<C> {
    /// List deals matching `filter`.
    ///
    /// # Errors
    ///
    /// See [`RdStationClient::request`].
    pub async fn list_deals(
        &self,
        ctx: &CallContext,
        filter: &ListDealsFilter,
    ) -> Result<ListDealsResponse> {
        self.get(ctx, DEALS.as_str(), filter).await
    }

    /// Create a deal. Both `200` and `201` count as success.
    ///
    /// # Errors
    ///
    /// See [`RdStationClient::request`].
    pub async fn create_deal(
        &self,
        ctx: &CallContext,
        deal: &CreateDealRequest,
    ) -> Result<DealResponse> {
        self.post(ctx, DEALS.as_str(), deal).await
    }

    /// Update the deal `deal_id` with the fields set in `deal`.
    ///
    /// # Errors
    ///
    /// See [`RdStationClient::request`].
    pub async fn update_deal(
        &self,
        ctx: &CallContext,
        deal_id: &str,
        deal: &UpdateDealRequest,
    ) -> Result<DealResponse> {
        let endpoint = DEAL_BY_ID.render(&[deal_id])?;
        self.put(ctx, &endpoint, deal).await
    }
}
