//! Registry admin surface
//!
//! Presentation logic of the registry page: the list controller, the record
//! form and the delete confirmation. It reaches the registry only through a
//! [`RegistryEndpoint`](crate::services::RegistryEndpoint) and reports every
//! outcome through a [`Notifier`](crate::services::Notifier).

mod controller;
mod form;
mod submit;
mod view;


pub use controller::{DeleteOutcome, RegistryController};
pub use form::{FormError, FormField, FormMode, RecordForm, SubmitOutcome};
pub use submit::{SubmitControl, SubmitGuard};
pub use view::{ListView, RegistryRow, EMPTY_STATE_MESSAGE};
