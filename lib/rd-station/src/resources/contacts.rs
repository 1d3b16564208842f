//! Contacts: records and operations.

#![allow(missing_docs)]

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Direction;
use crate::{CallContext, EndpointTemplate, HttpClient, Query, RdStationClient, Result};

const CONTACTS: EndpointTemplate = EndpointTemplate::new("contacts");
const CONTACT_BY_ID: EndpointTemplate = EndpointTemplate::new("contacts/{id}");

// ============================================================================
// Response records
// ============================================================================

/// A contact as listed by `GET /contacts`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    #[serde(deserialize_with = "super::null_default")]
    pub id: String,
    #[serde(deserialize_with = "super::null_default")]
    pub name: String,
    pub title: Option<String>,
    #[serde(deserialize_with = "super::null_default")]
    pub notes: String,
    pub birthday: Option<Birthday>,
    #[serde(deserialize_with = "super::null_default")]
    pub emails: Vec<Email>,
    #[serde(deserialize_with = "super::null_default")]
    pub phones: Vec<Phone>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub skype: Option<String>,
    pub organization_id: Option<String>,
    #[serde(deserialize_with = "super::null_default")]
    pub contact_custom_fields: Vec<ContactCustomField>,
    #[serde(deserialize_with = "super::null_default")]
    pub deals: Vec<ContactDeal>,
    #[serde(deserialize_with = "super::null_default")]
    pub legal_bases: Vec<LegalBasis>,
    #[serde(deserialize_with = "super::null_default")]
    pub created_at: String,
    #[serde(deserialize_with = "super::null_default")]
    pub updated_at: String,
}

/// Birthday of a contact. The year may be unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Birthday {
    #[serde(deserialize_with = "super::null_default")]
    pub day: u8,
    #[serde(deserialize_with = "super::null_default")]
    pub month: u8,
    pub year: Option<i32>,
}

/// An email address of a contact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Email {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(deserialize_with = "super::null_default")]
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Email {
    /// An address to send in a payload.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }
}

/// A phone number of a contact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Phone {
    #[serde(deserialize_with = "super::null_default")]
    pub phone: String,
    /// `cellphone`, `work`, `home`, `fax`...
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    #[serde(deserialize_with = "super::null_default")]
    pub whatsapp: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_full_internacional: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_url_web: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Phone {
    /// A number to send in a payload.
    #[must_use]
    pub fn new(phone: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            kind: Some(kind.into()),
            ..Self::default()
        }
    }
}

/// LGPD legal basis for processing the contact's data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegalBasis {
    #[serde(deserialize_with = "super::null_default")]
    pub category: String,
    #[serde(deserialize_with = "super::null_default")]
    pub status: String,
    #[serde(rename = "type", deserialize_with = "super::null_default")]
    pub kind: String,
}

/// A custom field value on a contact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactCustomField {
    #[serde(deserialize_with = "super::null_default")]
    pub custom_field_id: String,
    pub value: Value,
}

/// A deal a contact takes part in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactDeal {
    #[serde(rename = "_id", deserialize_with = "super::null_default")]
    pub internal_id: String,
    #[serde(deserialize_with = "super::null_default")]
    pub id: String,
    #[serde(deserialize_with = "super::null_default")]
    pub name: String,
    pub closed_at: Option<String>,
    pub prediction_date: Option<String>,
    pub deal_lost_reason_id: Option<String>,
    pub win: Option<Value>,
}

/// The organization of a contact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactOrganization {
    #[serde(rename = "_id", deserialize_with = "super::null_default")]
    pub id: String,
    #[serde(deserialize_with = "super::null_default")]
    pub name: String,
    pub resume: Option<String>,
    pub url: Option<String>,
}

/// Page of contacts returned by [`RdStationClient::list_contacts`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListContactsResponse {
    #[serde(deserialize_with = "super::null_default")]
    pub contacts: Vec<Contact>,
    #[serde(deserialize_with = "super::null_default")]
    pub has_more: bool,
    #[serde(deserialize_with = "super::null_default")]
    pub total: i64,
}

/// A contact as returned by creation and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactResponse {
    #[serde(deserialize_with = "super::null_default")]
    pub id: String,
    #[serde(rename = "_id", deserialize_with = "super::null_default")]
    pub internal_id: String,
    #[serde(deserialize_with = "super::null_default")]
    pub name: String,
    pub title: Option<String>,
    pub notes: Option<String>,
    pub birthday: Option<Birthday>,
    #[serde(deserialize_with = "super::null_default")]
    pub emails: Vec<Email>,
    #[serde(deserialize_with = "super::null_default")]
    pub phones: Vec<Phone>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub skype: Option<String>,
    pub organization: Option<ContactOrganization>,
    pub organization_id: Option<String>,
    #[serde(deserialize_with = "super::null_default")]
    pub contact_custom_fields: Vec<ContactCustomField>,
    #[serde(deserialize_with = "super::null_default")]
    pub deal_ids: Vec<String>,
    #[serde(deserialize_with = "super::null_default")]
    pub legal_bases: Vec<LegalBasis>,
    #[serde(deserialize_with = "super::null_default")]
    pub created_at: String,
    #[serde(deserialize_with = "super::null_default")]
    pub updated_at: String,
}

// ============================================================================
// Filter
// ============================================================================

/// Query of `GET /contacts`. Empty and zero fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Query)]
pub struct ListContactsFilter {
    pub page: u32,
    pub limit: u32,
    pub order: String,
    pub direction: Option<Direction>,
    pub email: String,
    /// Contact name.
    pub q: String,
    pub phone: String,
    pub title: String,
}

// ============================================================================
// Payloads
// ============================================================================

/// Body of `POST /contacts`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateContactRequest {
    pub contact: CreateContactData,
}

/// The contact to create. Unset options are left out of the payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateContactData {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<Birthday>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emails: Option<Vec<Email>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phones: Option<Vec<Phone>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_custom_fields: Option<Vec<ContactCustomField>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_bases: Option<Vec<LegalBasis>>,
}

/// Body of `PUT /contacts/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateContactRequest {
    pub contact: UpdateContactData,
}

/// Partial update of a contact: only set fields are sent.
///
/// `Some(vec![])` clears a list, `None` leaves it untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateContactData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<Birthday>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emails: Option<Vec<Email>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phones: Option<Vec<Phone>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_custom_fields: Option<Vec<ContactCustomField>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_bases: Option<Vec<LegalBasis>>,
}

// ============================================================================
// Operations
// ============================================================================

impl<C: HttpClient> RdStationClient<C> {
    /// List contacts matching `filter`.
    ///
    /// # Errors
    ///
    /// See [`RdStationClient::request`].
    pub async fn list_contacts(
        &self,
        ctx: &CallContext,
        filter: &ListContactsFilter,
    ) -> Result<ListContactsResponse> {
        self.get(ctx, CONTACTS.as_str(), filter).await
    }

    /// Create a contact. Both `200` and `201` count as success.
    ///
    /// # Errors
    ///
    /// See [`RdStationClient::request`].
    pub async fn create_contact(
        &self,
        ctx: &CallContext,
        contact: &CreateContactRequest,
    ) -> Result<ContactResponse> {
        self.post(ctx, CONTACTS.as_str(), contact).await
    }

    /// Update the contact `contact_id` with the fields set in `contact`.
    ///
    /// # Errors
    ///
    /// See [`RdStationClient::request`].
    pub async fn update_contact(
        &self,
        ctx: &CallContext,
        contact_id: &str,
        contact: &UpdateContactRequest,
    ) -> Result<ContactResponse> {
        let endpoint = CONTACT_BY_ID.render(&[contact_id])?;
        self.put(ctx, &endpoint, contact).await
    }
}
