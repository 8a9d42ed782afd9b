//! Services used by the admin surface

pub mod notification;
pub mod registry_client;

pub use notification::{
    messages, ConsoleNotifier, Notification, NotificationVariant, Notifier, RecordingNotifier,
};
pub use registry_client::{
    RegistryClient, RegistryClientError, RegistryEndpoint, RegistryResult,
};
