//! Domain layer - Core value objects
//!
//! Contains notification requests, show policy, backend selection,
//! the per-request delivery lifecycle, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod notification;

// Re-export common types
pub use config::{AppConfig, RouterConfig};
pub use error::*;
pub use notification::{
    select_backend, Backend, DeliveryState, NotificationIcon, NotificationId,
    NotificationRequest, ShowPolicy,
};
