//! Notification backend port interfaces
//!
//! Both backends are fire-and-forget: their present primitives return
//! immediately and report what happened later as [`BackendEvent`]s,
//! which the owner of the router feeds into
//! [`NotificationRouter::handle_event`](crate::application::NotificationRouter::handle_event).

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::domain::notification::{NotificationId, NotificationRequest};

/// Failures inside a backend adapter.
///
/// Never returned to the caller of `post`; adapters log them and
/// report the request as dismissed.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    #[error("{0} not found")]
    CommandNotFound(String),

    #[error("Failed to show notification: {0}")]
    SendFailed(String),
}

/// Sending half of the backend event channel
pub type EventSender = mpsc::UnboundedSender<BackendEvent>;

/// Receiving half of the backend event channel
pub type EventReceiver = mpsc::UnboundedReceiver<BackendEvent>;

/// Create the channel adapters report their events on
pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// The native center's notification object as reported back by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeNotification {
    /// Identifier the router assigned when posting
    pub identifier: String,
    pub title: String,
    pub body: Option<String>,
    /// Action key the user picked, if any
    pub action: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeEventKind {
    Delivered,
    Activated,
    Dismissed,
}

/// Callback from the native notification center
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeEvent {
    pub kind: NativeEventKind,
    pub notification: NativeNotification,
}

/// Opaque context handed to the legacy daemon bridge.
///
/// It embeds the router's identifier and the request payload and comes
/// back unchanged with the bridge's click callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClickContext(Value);

impl ClickContext {
    const ID_KEY: &'static str = "notification_id";
    const PAYLOAD_KEY: &'static str = "payload";

    /// Build the context for a posted request
    pub fn for_request(id: NotificationId, request: &NotificationRequest) -> Self {
        Self(json!({
            "notification_id": id.to_string(),
            "payload": request.payload(),
        }))
    }

    /// Wrap a raw value received from the bridge
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Extract the identifier, if the context carries a valid one
    pub fn notification_id(&self) -> Option<NotificationId> {
        self.0.get(Self::ID_KEY)?.as_str()?.parse().ok()
    }

    pub fn payload(&self) -> Option<&Value> {
        self.0.get(Self::PAYLOAD_KEY)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyEventKind {
    Clicked,
    TimedOut,
}

/// Callback from the legacy daemon bridge
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyEvent {
    pub kind: LegacyEventKind,
    pub context: ClickContext,
}

/// Any callback a backend can produce
#[derive(Debug, Clone, PartialEq)]
pub enum BackendEvent {
    Native(NativeEvent),
    Legacy(LegacyEvent),
}

impl BackendEvent {
    pub fn native(kind: NativeEventKind, notification: NativeNotification) -> Self {
        Self::Native(NativeEvent { kind, notification })
    }

    pub fn legacy(kind: LegacyEventKind, context: ClickContext) -> Self {
        Self::Legacy(LegacyEvent { kind, context })
    }
}

/// Port for the native OS notification center
pub trait NativeCenter: Send + Sync {
    /// Whether the host provides a usable notification center.
    ///
    /// Probed once by the router at construction.
    fn is_available(&self) -> bool;

    /// Schedule a notification for delivery.
    ///
    /// Must not block. Delivery, activation and dismissal are reported
    /// as [`NativeEvent`]s carrying `id` as the identifier.
    fn deliver(&self, id: NotificationId, request: &NotificationRequest);

    /// Remove a delivered notification from the center's list
    fn remove_delivered(&self, id: NotificationId);
}

/// Port for the legacy notification daemon bridge
pub trait LegacyBridge: Send + Sync {
    /// Register the application with the daemon
    fn register_application(&mut self, app_name: &str);

    /// Whether the daemon can currently be reached
    fn is_reachable(&self) -> bool;

    /// Show a notification.
    ///
    /// Must not block. A click is reported as a [`LegacyEvent`] carrying
    /// `context` back unchanged.
    fn notify(&self, id: NotificationId, request: &NotificationRequest, context: ClickContext);
}

/// Blanket implementation for boxed native center types
impl NativeCenter for Box<dyn NativeCenter> {
    fn is_available(&self) -> bool {
        self.as_ref().is_available()
    }

    fn deliver(&self, id: NotificationId, request: &NotificationRequest) {
        self.as_ref().deliver(id, request)
    }

    fn remove_delivered(&self, id: NotificationId) {
        self.as_ref().remove_delivered(id)
    }
}

/// Blanket implementation for boxed legacy bridge types
impl LegacyBridge for Box<dyn LegacyBridge> {
    fn register_application(&mut self, app_name: &str) {
        self.as_mut().register_application(app_name)
    }

    fn is_reachable(&self) -> bool {
        self.as_ref().is_reachable()
    }

    fn notify(&self, id: NotificationId, request: &NotificationRequest, context: ClickContext) {
        self.as_ref().notify(id, request, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_context_round_trips_id_and_payload() {
        let id = NotificationId::generate();
        let request = NotificationRequest::new("t").with_payload(json!({"url": "https://example.com"}));

        let context = ClickContext::for_request(id, &request);
        let echoed = ClickContext::from_value(context.as_value().clone());

        assert_eq!(echoed.notification_id(), Some(id));
        assert_eq!(echoed.payload().unwrap()["url"], "https://example.com");
    }

    #[test]
    fn click_context_without_id() {
        let context = ClickContext::from_value(json!({"other": 1}));
        assert!(context.notification_id().is_none());
    }

    #[test]
    fn click_context_with_malformed_id() {
        let context = ClickContext::from_value(json!({"notification_id": "nope"}));
        assert!(context.notification_id().is_none());

        let numeric = ClickContext::from_value(json!({"notification_id": 7}));
        assert!(numeric.notification_id().is_none());
    }

    #[test]
    fn click_context_serializes_transparently() {
        let id = NotificationId::generate();
        let context = ClickContext::for_request(id, &NotificationRequest::new("t"));
        let text = serde_json::to_string(&context).unwrap();
        let parsed: ClickContext = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, context);
        assert!(text.contains(&id.to_string()));
    }
}
