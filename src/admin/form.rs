//! Registry record form
//!
//! A dialog editing one record. It keeps its own copy of the fields and, on
//! submission, performs exactly one create or update request. The method is
//! chosen by whether the record it was opened with has an id.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use super::submit::SubmitControl;
use crate::models::{OrganizationFields, YouthOrganization};
use crate::services::{messages, Notification, Notifier, RegistryEndpoint};
use crate::utils::validation::{is_blank, validate_website_url};

/// Editable inputs of the form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Number,
    Municipality,
    EducationalInstitution,
    OrganizationName,
    ContactDetails,
    ParticipantsCount,
    ActivityDirection,
    LocalActDetails,
    WebsiteUrl,
}

impl FormField {
    pub const ALL: [FormField; 9] = [
        FormField::Number,
        FormField::Municipality,
        FormField::EducationalInstitution,
        FormField::OrganizationName,
        FormField::ContactDetails,
        FormField::ParticipantsCount,
        FormField::ActivityDirection,
        FormField::LocalActDetails,
        FormField::WebsiteUrl,
    ];

    /// Wire name of the field
    pub fn name(self) -> &'static str {
        match self {
            FormField::Number => "number",
            FormField::Municipality => "municipality",
            FormField::EducationalInstitution => "educational_institution",
            FormField::OrganizationName => "organization_name",
            FormField::ContactDetails => "contact_details",
            FormField::ParticipantsCount => "participants_count",
            FormField::ActivityDirection => "activity_direction",
            FormField::LocalActDetails => "local_act_details",
            FormField::WebsiteUrl => "website_url",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Number => "No.",
            FormField::Municipality => "Municipality",
            FormField::EducationalInstitution => "Educational institution",
            FormField::OrganizationName => "Organization name",
            FormField::ContactDetails => "Institution contact details",
            FormField::ParticipantsCount => "Number of participants",
            FormField::ActivityDirection => "Activity direction",
            FormField::LocalActDetails => "Local act details",
            FormField::WebsiteUrl => "Website or page link (optional)",
        }
    }

    pub fn is_required(self) -> bool {
        self != FormField::WebsiteUrl
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, FormField::Number | FormField::ParticipantsCount)
    }

    /// Multi-line text areas
    pub fn is_multiline(self) -> bool {
        matches!(self, FormField::ContactDetails | FormField::LocalActDetails)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

/// Native input constraint violated by the form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{} is required", .0.label())]
    Required(FormField),

    #[error("{} must be an absolute URL", FormField::WebsiteUrl.label())]
    InvalidUrl,

    #[error("Unknown field: {0}")]
    UnknownField(String),
}

/// Whether the form creates a new record or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: i64 },
}

/// Result of one submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The endpoint accepted the request; the caller reloads and closes the form
    Saved,
    /// Transport failure or non-success status; entered data is kept
    Failed,
    /// A native constraint blocked the submission; no request was made
    Invalid(FormError),
    /// Another submission of this form is still in flight; no request was made
    Busy,
}

/// Dialog state for adding or editing one record
#[derive(Debug, Clone)]
pub struct RecordForm {
    mode: FormMode,
    fields: OrganizationFields,
    submit: SubmitControl,
}

impl RecordForm {
    /// Empty form for a new record
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            fields: OrganizationFields::default(),
            submit: SubmitControl::new(),
        }
    }

    /// Form pre-populated from `organization`
    ///
    /// A record without an id is still submitted as a create.
    pub fn edit(organization: &YouthOrganization) -> Self {
        let mode = match organization.id {
            Some(id) => FormMode::Edit { id },
            None => FormMode::Create,
        };

        Self {
            mode,
            fields: organization.fields.clone(),
            submit: SubmitControl::new(),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add organization",
            FormMode::Edit { .. } => "Edit record",
        }
    }

    pub fn fields(&self) -> &OrganizationFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut OrganizationFields {
        &mut self.fields
    }

    /// Current text of an input
    pub fn value(&self, field: FormField) -> String {
        let f = &self.fields;
        match field {
            FormField::Number => f.number.to_string(),
            FormField::Municipality => f.municipality.clone(),
            FormField::EducationalInstitution => f.educational_institution.clone(),
            FormField::OrganizationName => f.organization_name.clone(),
            FormField::ContactDetails => f.contact_details.clone(),
            FormField::ParticipantsCount => f.participants_count.to_string(),
            FormField::ActivityDirection => f.activity_direction.clone(),
            FormField::LocalActDetails => f.local_act_details.clone(),
            FormField::WebsiteUrl => f.website_url.clone(),
        }
    }

    /// Apply what the user typed into an input
    ///
    /// Number inputs keep the integer prefix of the text and fall back to 0.
    pub fn set(&mut self, field: FormField, input: &str) {
        let f = &mut self.fields;
        match field {
            FormField::Number => f.number = parse_int_input(input),
            FormField::Municipality => f.municipality = input.to_string(),
            FormField::EducationalInstitution => f.educational_institution = input.to_string(),
            FormField::OrganizationName => f.organization_name = input.to_string(),
            FormField::ContactDetails => f.contact_details = input.to_string(),
            FormField::ParticipantsCount => f.participants_count = parse_int_input(input),
            FormField::ActivityDirection => f.activity_direction = input.to_string(),
            FormField::LocalActDetails => f.local_act_details = input.to_string(),
            FormField::WebsiteUrl => f.website_url = input.to_string(),
        }
    }

    /// Handle on the submit control's enabled state
    pub fn submit_control(&self) -> SubmitControl {
        self.submit.clone()
    }

    pub fn is_submitting(&self) -> bool {
        !self.submit.is_enabled()
    }

    /// Check the native input constraints
    pub fn validate(&self) -> Result<(), FormError> {
        for field in FormField::ALL {
            if field.is_required() && !field.is_numeric() && is_blank(&self.value(field)) {
                return Err(FormError::Required(field));
            }
        }
        if !validate_website_url(&self.fields.website_url) {
            return Err(FormError::InvalidUrl);
        }
        Ok(())
    }

    /// Send the form to the endpoint: update when editing, create otherwise
    pub async fn submit(
        &self,
        endpoint: &dyn RegistryEndpoint,
        notifier: &dyn Notifier,
    ) -> SubmitOutcome {
        if let Err(e) = self.validate() {
            debug!("Form submission blocked: {}", e);
            return SubmitOutcome::Invalid(e);
        }

        let Some(_guard) = self.submit.try_begin() else {
            debug!("Form submission ignored, another one is in flight");
            return SubmitOutcome::Busy;
        };

        let result = match self.mode {
            FormMode::Edit { id } => endpoint.update(id, &self.fields).await,
            FormMode::Create => endpoint.create(&self.fields).await,
        };

        match result {
            Ok(()) => {
                let description = match self.mode {
                    FormMode::Edit { .. } => messages::RECORD_UPDATED,
                    FormMode::Create => messages::RECORD_ADDED,
                };
                notifier.notify(Notification::success(description));
                SubmitOutcome::Saved
            }
            Err(e) => {
                tracing::warn!("Failed to save youth organization: {}", e);
                notifier.notify(Notification::error(messages::SAVE_FAILED));
                SubmitOutcome::Failed
            }
        }
    }
}

/// Integer prefix of a number input, 0 when there is none
fn parse_int_input(input: &str) -> i64 {
    let trimmed = input.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    digits[..end]
        .parse::<i64>()
        .map(|n| sign * n)
        .unwrap_or(0)
}
