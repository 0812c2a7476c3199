//! Disabled backend adapters

use crate::application::ports::{ClickContext, LegacyBridge, NativeCenter};
use crate::domain::notification::{NotificationId, NotificationRequest};

/// Native center that is never available
///
/// Used when the native center is disabled.
pub struct NoOpCenter;

impl NoOpCenter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeCenter for NoOpCenter {
    fn is_available(&self) -> bool {
        false
    }

    fn deliver(&self, id: NotificationId, _request: &NotificationRequest) {
        tracing::debug!(%id, "Native center disabled, dropping notification");
    }

    fn remove_delivered(&self, _id: NotificationId) {}
}

/// Legacy bridge whose daemon is never reachable
///
/// Used when the legacy daemon is disabled.
pub struct NoOpBridge;

impl NoOpBridge {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl LegacyBridge for NoOpBridge {
    fn register_application(&mut self, _app_name: &str) {}

    fn is_reachable(&self) -> bool {
        false
    }

    fn notify(&self, id: NotificationId, _request: &NotificationRequest, _context: ClickContext) {
        tracing::debug!(%id, "Legacy daemon disabled, dropping notification");
    }
}
