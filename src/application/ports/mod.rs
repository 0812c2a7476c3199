//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod backend;
pub mod config;
pub mod observer;

// Re-export common types
pub use backend::{
    event_channel, BackendError, BackendEvent, ClickContext, EventReceiver, EventSender,
    LegacyBridge, LegacyEvent, LegacyEventKind, NativeCenter, NativeEvent, NativeEventKind,
    NativeNotification,
};
pub use config::ConfigStore;
pub use observer::{ActivationEvent, ActivationHandler, NotificationObserver, RawBackendEvent};
