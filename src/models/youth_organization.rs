//! Youth organization registry record

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::utils::validation::{required_text, website_url};

/// Editable fields of a registry record
///
/// This is also the create (POST) body: it never carries an `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct OrganizationFields {
    /// Sequence/display number
    pub number: i64,

    /// Municipality the institution belongs to
    #[validate(custom(function = "required_text"))]
    pub municipality: String,

    /// Educational institution hosting the organization
    #[validate(custom(function = "required_text"))]
    pub educational_institution: String,

    /// Name of the youth organization
    #[validate(custom(function = "required_text"))]
    pub organization_name: String,

    /// Contact details of the institution (multi-line)
    #[validate(custom(function = "required_text"))]
    pub contact_details: String,

    /// Number of participants
    #[validate(range(min = 0))]
    pub participants_count: i64,

    /// Activity direction of the organization
    #[validate(custom(function = "required_text"))]
    pub activity_direction: String,

    /// Details of the local act establishing the organization (multi-line)
    #[validate(custom(function = "required_text"))]
    pub local_act_details: String,

    /// Optional link to the organization's site or page, `""` when absent
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "website_url"))]
    pub website_url: String,
}

/// A registry record as returned by the endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YouthOrganization {
    /// Server-assigned identifier; `None` until the record is first saved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(flatten)]
    pub fields: OrganizationFields,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_timestamp"
    )]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_timestamp"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl YouthOrganization {
    /// A record that has not been persisted yet
    pub fn new(fields: OrganizationFields) -> Self {
        Self {
            id: None,
            fields,
            created_at: None,
            updated_at: None,
        }
    }

    /// Whether the record exists server-side
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

/// Update (PUT) body: every field plus the record id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct UpdateOrganizationRequest {
    /// Missing ids are rejected by the endpoint with 400
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(flatten)]
    #[validate(nested)]
    pub fields: OrganizationFields,
}

impl UpdateOrganizationRequest {
    pub fn new(id: i64, fields: OrganizationFields) -> Self {
        Self {
            id: Some(id),
            fields,
        }
    }
}

/// Reply body of a successful delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteOrganizationResponse {
    pub message: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a stored or received timestamp
///
/// Accepts RFC 3339 and the naive `YYYY-MM-DD HH:MM:SS[.ffffff]` form
/// (read as UTC). Anything else yields `None`.
pub fn parse_timestamp(ts: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(ts, format).ok())
        .map(|dt| dt.and_utc())
}

/// Timestamps are informational only, so an unreadable one is dropped
/// instead of failing the whole record
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(parse_timestamp))
}
