//! Notification router use case
//!
//! Chooses a backend for every post according to the show policy and
//! host capabilities, and turns backend callbacks into a single
//! activation callback.

use std::sync::{Arc, Weak};

use thiserror::Error;

use crate::domain::config::RouterConfig;
use crate::domain::notification::{
    select_backend, Backend, DeliveryState, NotificationId, NotificationRequest, ShowPolicy,
};

use super::pending::{PendingEntry, PendingRequests};
use super::ports::{
    ActivationEvent, ActivationHandler, BackendEvent, ClickContext, LegacyBridge, LegacyEvent,
    LegacyEventKind, NativeCenter, NativeEvent, NativeEventKind, NotificationObserver,
    RawBackendEvent,
};

/// Errors from posting a notification
#[derive(Debug, Clone, Error)]
pub enum RouterError {
    #[error("No notification backend available (policy: {policy}, native center available: {native_available}, legacy daemon reachable: {legacy_reachable})")]
    BackendUnavailable {
        policy: ShowPolicy,
        native_available: bool,
        legacy_reachable: bool,
    },
}

/// Result of a successful post
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    /// Identifier assigned to the request
    pub id: NotificationId,
    /// Backend that received the request
    pub backend: Backend,
}

/// Who consumed an activation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationTarget {
    /// The per-call handler given to `post_with_handler`
    Handler,
    /// The registered observer
    Observer,
    /// No handler and no live observer
    Nobody,
}

/// What the router did with a backend event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// `removed` is set when a removal was requested from the native center
    Delivered { id: NotificationId, removed: bool },
    Activated { id: NotificationId, target: ActivationTarget },
    Dismissed { id: NotificationId },
    /// The event named no pending request of the reporting backend
    Unmatched,
    /// The event is not a valid transition for the request's state
    Ignored { id: NotificationId },
}

impl EventOutcome {
    /// The request this outcome concerns, if any
    pub fn id(&self) -> Option<NotificationId> {
        match self {
            Self::Delivered { id, .. }
            | Self::Activated { id, .. }
            | Self::Dismissed { id }
            | Self::Ignored { id } => Some(*id),
            Self::Unmatched => None,
        }
    }

    /// Whether the request reached a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Activated { .. } | Self::Dismissed { .. })
    }
}

/// Routes notifications to the native center or the legacy daemon.
///
/// All methods take `&mut self`; the router does no locking. Backend
/// events must be fed to [`handle_event`](Self::handle_event) from the
/// same execution context that posts.
///
/// The host services behind both backends are process-wide singletons
/// that call back a single delegate. Bind at most one router to each
/// of them per process.
pub struct NotificationRouter<N, L>
where
    N: NativeCenter,
    L: LegacyBridge,
{
    native: N,
    legacy: L,
    show_policy: ShowPolicy,
    observer: Option<Weak<dyn NotificationObserver>>,
    native_available: bool,
    auto_remove_delivered: bool,
    pending: PendingRequests,
}

impl<N, L> NotificationRouter<N, L>
where
    N: NativeCenter,
    L: LegacyBridge,
{
    /// Create a router.
    ///
    /// Registers the application with the legacy bridge and probes the
    /// native center once; the probe result is kept for the router's
    /// lifetime.
    pub fn new(native: N, mut legacy: L, config: RouterConfig) -> Self {
        legacy.register_application(&config.app_name);
        let native_available = native.is_available();

        tracing::debug!(
            policy = %config.show_policy,
            native_available,
            app_name = %config.app_name,
            "Notification router created"
        );

        Self {
            native,
            legacy,
            show_policy: config.show_policy,
            observer: None,
            native_available,
            auto_remove_delivered: config.auto_remove_delivered,
            pending: PendingRequests::new(),
        }
    }

    /// Post a notification; activation goes to the observer
    pub fn post(&mut self, request: NotificationRequest) -> Result<Dispatch, RouterError> {
        self.dispatch(request, None)
    }

    /// Post a notification whose activation is reported to `handler`
    /// instead of the observer
    pub fn post_with_handler<F>(
        &mut self,
        request: NotificationRequest,
        handler: F,
    ) -> Result<Dispatch, RouterError>
    where
        F: FnOnce(&ActivationEvent) + Send + 'static,
    {
        self.dispatch(request, Some(Box::new(handler)))
    }

    pub fn show_policy(&self) -> ShowPolicy {
        self.show_policy
    }

    /// Change the policy used by future posts
    pub fn set_show_policy(&mut self, policy: ShowPolicy) {
        self.show_policy = policy;
    }

    /// Register the observer for unhandled activations.
    ///
    /// Only a weak reference is kept.
    pub fn set_observer<O>(&mut self, observer: &Arc<O>)
    where
        O: NotificationObserver + 'static,
    {
        let weak: Weak<O> = Arc::downgrade(observer);
        self.observer = Some(weak);
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    /// Whether the native center was available when the router was built
    pub fn is_native_center_available(&self) -> bool {
        self.native_available
    }

    pub fn auto_remove_delivered(&self) -> bool {
        self.auto_remove_delivered
    }

    /// Remove native notifications from the center once delivered
    pub fn set_auto_remove_delivered(&mut self, enabled: bool) {
        self.auto_remove_delivered = enabled;
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// State of a pending request; `None` once it reached a terminal state
    pub fn state_of(&self, id: NotificationId) -> Option<DeliveryState> {
        self.pending.state_of(&id)
    }

    /// Feed one backend callback into the router
    pub fn handle_event(&mut self, event: BackendEvent) -> EventOutcome {
        match event {
            BackendEvent::Native(event) => self.handle_native(event),
            BackendEvent::Legacy(event) => self.handle_legacy(event),
        }
    }

    fn dispatch(
        &mut self,
        request: NotificationRequest,
        handler: Option<ActivationHandler>,
    ) -> Result<Dispatch, RouterError> {
        let policy = self.show_policy;
        let legacy_reachable = self.legacy.is_reachable();

        let Some(backend) = select_backend(policy, self.native_available, legacy_reachable) else {
            tracing::warn!(
                %policy,
                native_available = self.native_available,
                legacy_reachable,
                title = request.title(),
                "No notification backend available"
            );
            return Err(RouterError::BackendUnavailable {
                policy,
                native_available: self.native_available,
                legacy_reachable,
            });
        };

        let id = NotificationId::generate();
        let mut entry = PendingEntry::new(request, backend, handler);

        match backend {
            Backend::NativeCenter => {
                self.native.deliver(id, &entry.request);
            }
            Backend::Legacy => {
                let context = ClickContext::for_request(id, &entry.request);
                self.legacy.notify(id, &entry.request, context);
                // The daemon bridge has no delivery callback
                let _ = entry.lifecycle.deliver();
            }
        }

        tracing::debug!(%id, %backend, title = entry.request.title(), "Notification posted");
        self.pending.insert(id, entry);

        Ok(Dispatch { id, backend })
    }

    fn handle_native(&mut self, event: NativeEvent) -> EventOutcome {
        let NativeEvent { kind, notification } = event;

        let Some(id) = self.match_pending(
            notification.identifier.parse().ok(),
            Backend::NativeCenter,
        ) else {
            tracing::debug!(identifier = %notification.identifier, ?kind, "Ignoring unmatched native event");
            return EventOutcome::Unmatched;
        };

        match kind {
            NativeEventKind::Delivered => self.mark_delivered(id),
            NativeEventKind::Activated => self.activate(id, RawBackendEvent::Native(notification)),
            NativeEventKind::Dismissed => self.dismiss(id),
        }
    }

    fn handle_legacy(&mut self, event: LegacyEvent) -> EventOutcome {
        let LegacyEvent { kind, context } = event;

        let Some(id) = self.match_pending(context.notification_id(), Backend::Legacy) else {
            tracing::debug!(?kind, "Ignoring unmatched legacy event");
            return EventOutcome::Unmatched;
        };

        match kind {
            LegacyEventKind::Clicked => self.activate(id, RawBackendEvent::Legacy(context)),
            LegacyEventKind::TimedOut => self.dismiss(id),
        }
    }

    fn match_pending(&self, id: Option<NotificationId>, backend: Backend) -> Option<NotificationId> {
        let id = id?;
        self.pending.find(&id, backend).map(|_| id)
    }

    fn mark_delivered(&mut self, id: NotificationId) -> EventOutcome {
        let Some(entry) = self.pending.get_mut(&id) else {
            return EventOutcome::Unmatched;
        };

        if let Err(e) = entry.lifecycle.deliver() {
            tracing::debug!(%id, error = %e, "Ignoring delivery report");
            return EventOutcome::Ignored { id };
        }

        let removed = self.auto_remove_delivered && entry.backend == Backend::NativeCenter;
        if removed {
            self.native.remove_delivered(id);
        }

        tracing::debug!(%id, removed, "Notification delivered");
        EventOutcome::Delivered { id, removed }
    }

    fn activate(&mut self, id: NotificationId, raw: RawBackendEvent) -> EventOutcome {
        let Some(entry) = self.pending.get_mut(&id) else {
            return EventOutcome::Unmatched;
        };

        if entry.state() == DeliveryState::Posted {
            tracing::debug!(%id, "Activation implies delivery");
            let _ = entry.lifecycle.deliver();
        }

        if let Err(e) = entry.lifecycle.activate() {
            tracing::debug!(%id, error = %e, "Ignoring activation");
            return EventOutcome::Ignored { id };
        }

        let Some(entry) = self.pending.remove(&id) else {
            return EventOutcome::Unmatched;
        };

        let event = ActivationEvent::new(id, entry.request, raw);
        let target = if let Some(handler) = entry.handler {
            handler(&event);
            ActivationTarget::Handler
        } else if let Some(observer) = self.observer.as_ref().and_then(Weak::upgrade) {
            observer.on_unhandled_activation(&event);
            ActivationTarget::Observer
        } else {
            ActivationTarget::Nobody
        };

        tracing::info!(%id, backend = %event.raw().backend(), ?target, "Notification activated");
        EventOutcome::Activated { id, target }
    }

    fn dismiss(&mut self, id: NotificationId) -> EventOutcome {
        let Some(entry) = self.pending.get_mut(&id) else {
            return EventOutcome::Unmatched;
        };

        if let Err(e) = entry.lifecycle.dismiss() {
            tracing::debug!(%id, error = %e, "Ignoring dismissal");
            return EventOutcome::Ignored { id };
        }

        self.pending.remove(&id);
        tracing::debug!(%id, "Notification dismissed");
        EventOutcome::Dismissed { id }
    }
}

impl<N, L> Drop for NotificationRouter<N, L>
where
    N: NativeCenter,
    L: LegacyBridge,
{
    fn drop(&mut self) {
        let discarded = self.pending.clear();
        if discarded > 0 {
            tracing::debug!(discarded, "Discarding pending notifications");
        }
    }
}
