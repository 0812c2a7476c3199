//! Per-request delivery state machine

use std::fmt;
use thiserror::Error;

/// Delivery states of a posted request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeliveryState {
    #[default]
    Posted,
    Delivered,
    Activated,
    Dismissed,
}

impl DeliveryState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Posted => "posted",
            Self::Delivered => "delivered",
            Self::Activated => "activated",
            Self::Dismissed => "dismissed",
        }
    }

    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Activated | Self::Dismissed)
    }
}

impl fmt::Display for DeliveryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid delivery transition: cannot {action} while {current_state}")]
pub struct InvalidTransition {
    pub current_state: DeliveryState,
    pub action: &'static str,
}

/// Lifecycle of one posted request.
///
/// State machine:
///   POSTED -> DELIVERED (deliver)
///   DELIVERED -> ACTIVATED (activate)
///   POSTED | DELIVERED -> DISMISSED (dismiss)
///
/// ACTIVATED and DISMISSED are terminal.
#[derive(Debug, Default)]
pub struct DeliveryLifecycle {
    state: DeliveryState,
}

impl DeliveryLifecycle {
    pub fn new() -> Self {
        Self {
            state: DeliveryState::Posted,
        }
    }

    pub fn state(&self) -> DeliveryState {
        self.state
    }

    /// Transition from POSTED to DELIVERED
    pub fn deliver(&mut self) -> Result<(), InvalidTransition> {
        if self.state != DeliveryState::Posted {
            return Err(InvalidTransition {
                current_state: self.state,
                action: "deliver",
            });
        }
        self.state = DeliveryState::Delivered;
        Ok(())
    }

    /// Transition from DELIVERED to ACTIVATED
    pub fn activate(&mut self) -> Result<(), InvalidTransition> {
        if self.state != DeliveryState::Delivered {
            return Err(InvalidTransition {
                current_state: self.state,
                action: "activate",
            });
        }
        self.state = DeliveryState::Activated;
        Ok(())
    }

    /// Transition from any non-terminal state to DISMISSED
    pub fn dismiss(&mut self) -> Result<(), InvalidTransition> {
        if self.state.is_terminal() {
            return Err(InvalidTransition {
                current_state: self.state,
                action: "dismiss",
            });
        }
        self.state = DeliveryState::Dismissed;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_lifecycle_is_posted() {
        let lifecycle = DeliveryLifecycle::new();
        assert_eq!(lifecycle.state(), DeliveryState::Posted);
        assert!(!lifecycle.state().is_terminal());
    }

    #[test]
    fn deliver_then_activate() {
        let mut lifecycle = DeliveryLifecycle::new();
        lifecycle.deliver().unwrap();
        assert_eq!(lifecycle.state(), DeliveryState::Delivered);
        lifecycle.activate().unwrap();
        assert_eq!(lifecycle.state(), DeliveryState::Activated);
        assert!(lifecycle.state().is_terminal());
    }

    #[test]
    fn activate_before_delivery_fails() {
        let mut lifecycle = DeliveryLifecycle::new();
        let err = lifecycle.activate().unwrap_err();
        assert_eq!(err.current_state, DeliveryState::Posted);
        assert_eq!(err.action, "activate");
    }

    #[test]
    fn deliver_twice_fails() {
        let mut lifecycle = DeliveryLifecycle::new();
        lifecycle.deliver().unwrap();
        let err = lifecycle.deliver().unwrap_err();
        assert_eq!(err.current_state, DeliveryState::Delivered);
    }

    #[test]
    fn dismiss_from_posted_and_delivered() {
        let mut posted = DeliveryLifecycle::new();
        posted.dismiss().unwrap();
        assert_eq!(posted.state(), DeliveryState::Dismissed);

        let mut delivered = DeliveryLifecycle::new();
        delivered.deliver().unwrap();
        delivered.dismiss().unwrap();
        assert_eq!(delivered.state(), DeliveryState::Dismissed);
    }

    #[test]
    fn terminal_states_reject_everything() {
        let mut activated = DeliveryLifecycle::new();
        activated.deliver().unwrap();
        activated.activate().unwrap();
        assert!(activated.activate().is_err());
        assert!(activated.dismiss().is_err());
        assert!(activated.deliver().is_err());

        let mut dismissed = DeliveryLifecycle::new();
        dismissed.dismiss().unwrap();
        assert!(dismissed.activate().is_err());
        assert!(dismissed.dismiss().is_err());
        assert!(dismissed.deliver().is_err());
    }

    #[test]
    fn state_display() {
        assert_eq!(DeliveryState::Posted.to_string(), "posted");
        assert_eq!(DeliveryState::Delivered.to_string(), "delivered");
        assert_eq!(DeliveryState::Activated.to_string(), "activated");
        assert_eq!(DeliveryState::Dismissed.to_string(), "dismissed");
    }

    #[test]
    fn error_display() {
        let err = InvalidTransition {
            current_state: DeliveryState::Dismissed,
            action: "activate",
        };
        let msg = err.to_string();
        assert!(msg.contains("activate"));
        assert!(msg.contains("dismissed"));
    }
}
