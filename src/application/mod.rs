//! Application layer - Use cases and port interfaces
//!
//! Contains the notification router and the trait definitions
//! for the backends, the observer and configuration storage.

pub mod pending;
pub mod ports;
pub mod router;

// Re-export use cases
pub use router::{
    ActivationTarget, Dispatch, EventOutcome, NotificationRouter, RouterError,
};
