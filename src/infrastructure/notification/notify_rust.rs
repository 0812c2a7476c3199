//! Native notification center adapter using notify-rust
//!
//! Works on Windows, macOS, and Linux. Activation and dismissal are only
//! reported where the notification server supports actions (Linux/BSD);
//! elsewhere requests stay delivered until the router is dropped.
//!
//! Removing a delivered notification on Linux/BSD re-sends it with its
//! server id as `replaces_id` and closes the returned handle, so the
//! `CloseNotification` call goes over notify-rust's own bus connection.

use std::thread;

use notify_rust::Notification;

use crate::application::ports::{
    BackendEvent, EventSender, NativeCenter, NativeEventKind, NativeNotification,
};
use crate::domain::config::DEFAULT_APP_NAME;
use crate::domain::notification::{NotificationId, NotificationRequest};

use super::probe;

#[cfg(all(unix, not(target_os = "macos")))]
use std::collections::HashMap;
#[cfg(all(unix, not(target_os = "macos")))]
use std::sync::{Arc, Mutex, PoisonError};

/// Action key sent by the server when the notification body is clicked
#[cfg(all(unix, not(target_os = "macos")))]
const DEFAULT_ACTION: &str = "default";

/// Pseudo-action notify-rust reports when the notification closes
#[cfg(all(unix, not(target_os = "macos")))]
const CLOSED_ACTION: &str = "__closed";

/// A notification currently on screen
#[cfg(all(unix, not(target_os = "macos")))]
struct OnScreen {
    server_id: u32,
    notification: Notification,
}

/// Notifications on screen, keyed by router id
#[cfg(all(unix, not(target_os = "macos")))]
type ServerIds = Arc<Mutex<HashMap<NotificationId, OnScreen>>>;

/// Native notification center backed by notify-rust
pub struct NotifyRustCenter {
    /// Application name for notifications
    app_name: String,
    events: EventSender,
    #[cfg(all(unix, not(target_os = "macos")))]
    server_ids: ServerIds,
}

impl NotifyRustCenter {
    /// Create a new notify-rust center reporting on `events`
    pub fn new(events: EventSender) -> Self {
        Self::with_app_name(DEFAULT_APP_NAME, events)
    }

    /// Create with custom app name
    pub fn with_app_name(app_name: impl Into<String>, events: EventSender) -> Self {
        Self {
            app_name: app_name.into(),
            events,
            #[cfg(all(unix, not(target_os = "macos")))]
            server_ids: ServerIds::default(),
        }
    }

    fn build(&self, request: &NotificationRequest) -> Notification {
        let mut notification = Notification::new();
        notification
            .appname(&self.app_name)
            .summary(request.title())
            .icon(request.icon().icon_name());

        let body = request.display_body();
        if !body.is_empty() {
            notification.body(&body);
        }

        #[cfg(all(unix, not(target_os = "macos")))]
        notification.action(DEFAULT_ACTION, "Open");

        notification
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
fn run_delivery(
    id: NotificationId,
    notification: Notification,
    shown: NativeNotification,
    events: EventSender,
    server_ids: ServerIds,
) {
    let handle = match notification.show() {
        Ok(handle) => handle,
        Err(e) => {
            tracing::warn!(%id, error = %e, "Failed to show native notification");
            let _ = events.send(BackendEvent::native(NativeEventKind::Dismissed, shown));
            return;
        }
    };

    server_ids
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(
            id,
            OnScreen {
                server_id: handle.id(),
                notification,
            },
        );
    let _ = events.send(BackendEvent::native(NativeEventKind::Delivered, shown.clone()));

    // Blocks until the user acts on the notification or it closes
    handle.wait_for_action(|action| {
        let event = if action == CLOSED_ACTION {
            BackendEvent::native(NativeEventKind::Dismissed, shown)
        } else {
            BackendEvent::native(
                NativeEventKind::Activated,
                NativeNotification {
                    action: Some(action.to_string()),
                    ..shown
                },
            )
        };
        let _ = events.send(event);
    });

    server_ids
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .remove(&id);
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
fn run_delivery(
    id: NotificationId,
    notification: Notification,
    shown: NativeNotification,
    events: EventSender,
) {
    let kind = match notification.show() {
        Ok(_) => NativeEventKind::Delivered,
        Err(e) => {
            tracing::warn!(%id, error = %e, "Failed to show native notification");
            NativeEventKind::Dismissed
        }
    };
    let _ = events.send(BackendEvent::native(kind, shown));
}

impl NativeCenter for NotifyRustCenter {
    fn is_available(&self) -> bool {
        probe::native_center_available()
    }

    fn deliver(&self, id: NotificationId, request: &NotificationRequest) {
        let notification = self.build(request);
        let body = request.display_body();
        let shown = NativeNotification {
            identifier: id.to_string(),
            title: request.title().to_string(),
            body: (!body.is_empty()).then_some(body),
            action: None,
        };
        let events = self.events.clone();
        #[cfg(all(unix, not(target_os = "macos")))]
        let server_ids = Arc::clone(&self.server_ids);

        // notify-rust blocks on the notification server, so run detached
        let spawned = thread::Builder::new()
            .name("notify-rust".to_string())
            .spawn({
                let shown = shown.clone();
                move || {
                    #[cfg(all(unix, not(target_os = "macos")))]
                    run_delivery(id, notification, shown, events, server_ids);
                    #[cfg(not(all(unix, not(target_os = "macos"))))]
                    run_delivery(id, notification, shown, events);
                }
            });

        if let Err(e) = spawned {
            tracing::warn!(%id, error = %e, "Failed to spawn notification thread");
            let _ = self
                .events
                .send(BackendEvent::native(NativeEventKind::Dismissed, shown));
        }
    }

    fn remove_delivered(&self, id: NotificationId) {
        #[cfg(all(unix, not(target_os = "macos")))]
        {
            let on_screen = self
                .server_ids
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&id);

            match on_screen {
                Some(on_screen) => spawn_close(id, on_screen),
                None => tracing::debug!(%id, "Notification no longer on screen"),
            }
        }

        #[cfg(not(all(unix, not(target_os = "macos"))))]
        tracing::debug!(%id, "Removing delivered notifications is not supported on this platform");
    }
}

/// Close a notification by server id on a detached thread
#[cfg(all(unix, not(target_os = "macos")))]
fn spawn_close(id: NotificationId, on_screen: OnScreen) {
    let OnScreen {
        server_id,
        mut notification,
    } = on_screen;

    let spawned = thread::Builder::new()
        .name("notify-rust-close".to_string())
        .spawn(move || match notification.id(server_id).show() {
            Ok(handle) => {
                tracing::debug!(%id, server_id, "Closing delivered notification");
                handle.close();
            }
            Err(e) => {
                tracing::warn!(%id, server_id, error = %e, "Failed to remove delivered notification");
            }
        });

    if let Err(e) = spawned {
        tracing::warn!(%id, error = %e, "Failed to spawn close thread");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::event_channel;

    #[test]
    fn center_creates_successfully() {
        let (events, _rx) = event_channel();
        let center = NotifyRustCenter::new(events);
        assert_eq!(center.app_name, "notify-router");
    }

    #[test]
    fn center_with_custom_app_name() {
        let (events, _rx) = event_channel();
        let center = NotifyRustCenter::with_app_name("TestApp", events);
        assert_eq!(center.app_name, "TestApp");
    }

    #[test]
    fn build_maps_request_fields() {
        let (events, _rx) = event_channel();
        let center = NotifyRustCenter::with_app_name("TestApp", events);
        let request = NotificationRequest::new("Title")
            .with_subtitle("Sub")
            .with_body("Body");

        let notification = center.build(&request);
        assert_eq!(notification.appname, "TestApp");
        assert_eq!(notification.summary, "Title");
        assert_eq!(notification.body, "Sub\nBody");
    }

    #[test]
    #[cfg(all(unix, not(target_os = "macos")))]
    fn build_adds_default_action() {
        let (events, _rx) = event_channel();
        let center = NotifyRustCenter::new(events);
        let notification = center.build(&NotificationRequest::new("Title"));
        assert_eq!(notification.actions, vec!["default".to_string(), "Open".to_string()]);
    }

    #[test]
    #[cfg(all(unix, not(target_os = "macos")))]
    fn remove_known_notification_forgets_server_id() {
        let (events, mut rx) = event_channel();
        let center = NotifyRustCenter::new(events);
        let id = NotificationId::generate();
        let notification = center.build(&NotificationRequest::new("Title"));
        center.server_ids.lock().unwrap().insert(
            id,
            OnScreen {
                server_id: 17,
                notification,
            },
        );

        center.remove_delivered(id);

        assert!(!center.server_ids.lock().unwrap().contains_key(&id));
        // The close reply arrives through the delivery thread, not here
        assert!(rx.try_recv().is_err());

        // A second removal has nothing left to close
        center.remove_delivered(id);
        assert!(center.server_ids.lock().unwrap().is_empty());
    }

    #[test]
    #[cfg(all(unix, not(target_os = "macos")))]
    fn remove_unknown_notification_is_noop() {
        let (events, mut rx) = event_channel();
        let center = NotifyRustCenter::new(events);
        center.remove_delivered(NotificationId::generate());
        assert!(rx.try_recv().is_err());
    }
}
