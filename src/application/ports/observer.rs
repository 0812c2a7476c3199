//! Activation observer port

use crate::domain::notification::{Backend, NotificationId, NotificationRequest};

use super::backend::{ClickContext, NativeNotification};

/// The backend-specific object that accompanied an activation
#[derive(Debug, Clone, PartialEq)]
pub enum RawBackendEvent {
    Native(NativeNotification),
    Legacy(ClickContext),
}

impl RawBackendEvent {
    pub fn backend(&self) -> Backend {
        match self {
            Self::Native(_) => Backend::NativeCenter,
            Self::Legacy(_) => Backend::Legacy,
        }
    }
}

/// A user activation, normalized across backends
#[derive(Debug)]
pub struct ActivationEvent {
    id: NotificationId,
    request: NotificationRequest,
    raw: RawBackendEvent,
}

impl ActivationEvent {
    pub(crate) fn new(id: NotificationId, request: NotificationRequest, raw: RawBackendEvent) -> Self {
        Self { id, request, raw }
    }

    pub fn id(&self) -> NotificationId {
        self.id
    }

    /// The request exactly as it was posted
    pub fn request(&self) -> &NotificationRequest {
        &self.request
    }

    pub fn raw(&self) -> &RawBackendEvent {
        &self.raw
    }
}

/// One-shot callback scoped to a single post
pub type ActivationHandler = Box<dyn FnOnce(&ActivationEvent) + Send>;

/// Receives activations that no per-call handler consumed.
///
/// The router holds observers weakly; only one observer is registered
/// at a time.
pub trait NotificationObserver: Send + Sync {
    fn on_unhandled_activation(&self, event: &ActivationEvent);
}
