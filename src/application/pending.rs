//! Table of posted requests awaiting a terminal backend event

use std::collections::HashMap;

use crate::domain::notification::{
    Backend, DeliveryLifecycle, DeliveryState, NotificationId, NotificationRequest,
};

use super::ports::ActivationHandler;

/// One posted request and everything needed to route its activation
pub struct PendingEntry {
    pub request: NotificationRequest,
    pub backend: Backend,
    pub lifecycle: DeliveryLifecycle,
    pub handler: Option<ActivationHandler>,
}

impl PendingEntry {
    pub fn new(
        request: NotificationRequest,
        backend: Backend,
        handler: Option<ActivationHandler>,
    ) -> Self {
        Self {
            request,
            backend,
            lifecycle: DeliveryLifecycle::new(),
            handler,
        }
    }

    pub fn state(&self) -> DeliveryState {
        self.lifecycle.state()
    }
}

/// Pending requests keyed by the identifier assigned at post time.
///
/// Entries are removed on their terminal transition, so a lookup never
/// finds an activated or dismissed request.
#[derive(Default)]
pub struct PendingRequests {
    entries: HashMap<NotificationId, PendingEntry>,
}

impl PendingRequests {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: NotificationId, entry: PendingEntry) {
        self.entries.insert(id, entry);
    }

    pub fn get_mut(&mut self, id: &NotificationId) -> Option<&mut PendingEntry> {
        self.entries.get_mut(id)
    }

    pub fn remove(&mut self, id: &NotificationId) -> Option<PendingEntry> {
        self.entries.remove(id)
    }

    /// Look up an entry only if it was posted to `backend`
    pub fn find(&self, id: &NotificationId, backend: Backend) -> Option<&PendingEntry> {
        self.entries.get(id).filter(|entry| entry.backend == backend)
    }

    pub fn state_of(&self, id: &NotificationId) -> Option<DeliveryState> {
        self.entries.get(id).map(PendingEntry::state)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry without running any handler
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(backend: Backend) -> PendingEntry {
        PendingEntry::new(NotificationRequest::new("t"), backend, None)
    }

    #[test]
    fn new_table_is_empty() {
        let table = PendingRequests::new();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn insert_and_lookup() {
        let mut table = PendingRequests::new();
        let id = NotificationId::generate();
        table.insert(id, entry(Backend::NativeCenter));

        assert_eq!(table.len(), 1);
        assert_eq!(table.state_of(&id), Some(DeliveryState::Posted));
        assert!(table.get_mut(&id).is_some());
    }

    #[test]
    fn find_checks_backend() {
        let mut table = PendingRequests::new();
        let id = NotificationId::generate();
        table.insert(id, entry(Backend::Legacy));

        assert!(table.find(&id, Backend::Legacy).is_some());
        assert!(table.find(&id, Backend::NativeCenter).is_none());
    }

    #[test]
    fn remove_takes_entry_out() {
        let mut table = PendingRequests::new();
        let id = NotificationId::generate();
        table.insert(id, entry(Backend::NativeCenter));

        let removed = table.remove(&id).unwrap();
        assert_eq!(removed.request.title(), "t");
        assert!(table.state_of(&id).is_none());
        assert!(table.remove(&id).is_none());
    }

    #[test]
    fn clear_reports_count() {
        let mut table = PendingRequests::new();
        table.insert(NotificationId::generate(), entry(Backend::NativeCenter));
        table.insert(NotificationId::generate(), entry(Backend::Legacy));

        assert_eq!(table.clear(), 2);
        assert!(table.is_empty());
    }

    #[test]
    fn state_follows_lifecycle() {
        let mut table = PendingRequests::new();
        let id = NotificationId::generate();
        table.insert(id, entry(Backend::NativeCenter));

        table.get_mut(&id).unwrap().lifecycle.deliver().unwrap();
        assert_eq!(table.state_of(&id), Some(DeliveryState::Delivered));
    }
}
