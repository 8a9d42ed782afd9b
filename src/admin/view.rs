//! List area of the registry page

use serde::Serialize;

use super::form::FormField;
use crate::models::YouthOrganization;

/// Shown instead of the table when the registry has no records
pub const EMPTY_STATE_MESSAGE: &str = "No organizations in the registry yet";

/// One table row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryRow {
    pub id: Option<i64>,
    pub number: i64,
    pub municipality: String,
    pub educational_institution: String,
    pub organization_name: String,
    pub contact_details: String,
    pub participants_count: i64,
    pub activity_direction: String,
    pub local_act_details: String,
    /// `None` when the record has no link
    pub website_url: Option<String>,
}

impl From<&YouthOrganization> for RegistryRow {
    fn from(org: &YouthOrganization) -> Self {
        let f = &org.fields;
        Self {
            id: org.id,
            number: f.number,
            municipality: f.municipality.clone(),
            educational_institution: f.educational_institution.clone(),
            organization_name: f.organization_name.clone(),
            contact_details: f.contact_details.clone(),
            participants_count: f.participants_count,
            activity_direction: f.activity_direction.clone(),
            local_act_details: f.local_act_details.clone(),
            website_url: (!f.website_url.is_empty()).then(|| f.website_url.clone()),
        }
    }
}

/// What the list area displays
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ListView {
    Empty { message: String },
    Rows { rows: Vec<RegistryRow> },
}

impl ListView {
    /// Rows in the order the endpoint returned them
    pub fn from_records(records: &[YouthOrganization]) -> Self {
        if records.is_empty() {
            ListView::Empty {
                message: EMPTY_STATE_MESSAGE.to_string(),
            }
        } else {
            ListView::Rows {
                rows: records.iter().map(RegistryRow::from).collect(),
            }
        }
    }

    pub fn rows(&self) -> &[RegistryRow] {
        match self {
            ListView::Empty { .. } => &[],
            ListView::Rows { rows } => rows.as_slice(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ListView::Empty { .. })
    }

    /// Plain-text rendering for the terminal front end
    pub fn render(&self) -> String {
        match self {
            ListView::Empty { message } => message.clone(),
            ListView::Rows { rows } => {
                let mut out = format!(
                    "{:>5}  {:>4}  {:<24}  {:<32}  {:>6}  {}\n",
                    "ID",
                    FormField::Number.label(),
                    FormField::Municipality.label(),
                    FormField::OrganizationName.label(),
                    "Members",
                    FormField::ActivityDirection.label(),
                );
                for row in rows {
                    out.push_str(&format!(
                        "{:>5}  {:>4}  {:<24}  {:<32}  {:>6}  {}\n",
                        row.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
                        row.number,
                        truncate(&row.municipality, 24),
                        truncate(&row.organization_name, 32),
                        row.participants_count,
                        row.activity_direction,
                    ));
                }
                out
            }
        }
    }
}

/// Cut `text` to `max` characters, marking the cut with an ellipsis
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
