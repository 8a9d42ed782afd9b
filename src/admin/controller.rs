//! Registry list controller
//!
//! Owns the in-memory collection fetched from the endpoint and the dialog
//! state (open form, pending deletion). The collection is never patched
//! locally: every successful mutation is followed by exactly one full reload.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::form::{RecordForm, SubmitOutcome};
use super::view::ListView;
use crate::models::YouthOrganization;
use crate::services::{messages, Notification, Notifier, RegistryEndpoint};

/// Outcome of a confirmed deletion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Failed,
    /// No deletion was pending
    NothingPending,
}

pub struct RegistryController {
    endpoint: Arc<dyn RegistryEndpoint>,
    notifier: Arc<dyn Notifier>,
    organizations: Vec<YouthOrganization>,
    selected: Option<YouthOrganization>,
    form: Option<RecordForm>,
    pending_delete: Option<i64>,
}

impl RegistryController {
    pub fn new(endpoint: Arc<dyn RegistryEndpoint>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            endpoint,
            notifier,
            organizations: Vec::new(),
            selected: None,
            form: None,
            pending_delete: None,
        }
    }

    /// Fetch the whole collection, replacing local state on success
    ///
    /// On failure the previous collection is kept and an error is shown.
    pub async fn load(&mut self) -> bool {
        match self.endpoint.list().await {
            Ok(organizations) => {
                debug!("Loaded {} youth organizations", organizations.len());
                self.organizations = organizations;
                true
            }
            Err(e) => {
                warn!("Failed to load youth organizations: {}", e);
                self.notifier
                    .notify(Notification::error(messages::LOAD_FAILED));
                false
            }
        }
    }

    pub fn organizations(&self) -> &[YouthOrganization] {
        &self.organizations
    }

    pub fn find(&self, id: i64) -> Option<&YouthOrganization> {
        self.organizations.iter().find(|org| org.id == Some(id))
    }

    pub fn view(&self) -> ListView {
        ListView::from_records(&self.organizations)
    }

    /// Open an empty form for a new record
    pub fn begin_add(&mut self) -> &mut RecordForm {
        self.selected = None;
        self.form.insert(RecordForm::create())
    }

    /// Open the form pre-populated with a listed record
    pub fn begin_edit(&mut self, id: i64) -> Option<&mut RecordForm> {
        let organization = self.find(id)?.clone();
        let form = RecordForm::edit(&organization);
        self.selected = Some(organization);
        Some(self.form.insert(form))
    }

    /// Record being edited, if any
    pub fn selected(&self) -> Option<&YouthOrganization> {
        self.selected.as_ref()
    }

    pub fn form(&self) -> Option<&RecordForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut RecordForm> {
        self.form.as_mut()
    }

    /// Dismiss the form; a submission already sent is not aborted
    pub fn close_form(&mut self) {
        self.form = None;
        self.selected = None;
    }

    /// Submit the open form, closing it and reloading on success
    pub async fn submit_form(&mut self) -> Option<SubmitOutcome> {
        let endpoint = Arc::clone(&self.endpoint);
        let notifier = Arc::clone(&self.notifier);
        let form = self.form.as_ref()?;

        let outcome = form.submit(endpoint.as_ref(), notifier.as_ref()).await;

        if outcome == SubmitOutcome::Saved {
            self.close_form();
            self.load().await;
        }

        Some(outcome)
    }

    /// Ask for confirmation before deleting `id`; nothing is sent yet
    pub fn request_delete(&mut self, id: i64) {
        self.pending_delete = Some(id);
    }

    /// Id awaiting confirmation, if the prompt is open
    pub fn pending_delete(&self) -> Option<i64> {
        self.pending_delete
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Delete the pending record; the prompt closes whatever the outcome
    ///
    /// Taking `&mut self` keeps a second confirmation from starting while
    /// the request is in flight.
    pub async fn confirm_delete(&mut self) -> DeleteOutcome {
        let Some(id) = self.pending_delete else {
            return DeleteOutcome::NothingPending;
        };

        let result = self.endpoint.delete(id).await;
        self.pending_delete = None;

        match result {
            Ok(()) => {
                info!(id, "Youth organization deleted");
                self.notifier
                    .notify(Notification::success(messages::RECORD_DELETED));
                self.load().await;
                DeleteOutcome::Deleted
            }
            Err(e) => {
                warn!("Failed to delete youth organization {}: {}", id, e);
                self.notifier
                    .notify(Notification::error(messages::DELETE_FAILED));
                DeleteOutcome::Failed
            }
        }
    }
}
