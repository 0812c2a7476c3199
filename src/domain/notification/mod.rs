//! Notification value objects and the delivery lifecycle

mod lifecycle;
mod policy;
mod request;

pub use lifecycle::{DeliveryLifecycle, DeliveryState, InvalidTransition};
pub use policy::{select_backend, Backend, ShowPolicy, ALL_POLICIES};
pub use request::{NotificationIcon, NotificationId, NotificationRequest};
