//! notify-router - desktop notification routing
//!
//! Posts notifications either to the platform's native notification
//! center or to a legacy notification daemon, chosen per post from a
//! show policy and what the host offers, and reports user activation
//! through one callback regardless of the backend that delivered it.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Requests, the show policy and backend selection, the delivery lifecycle, config
//! - **Application**: The notification router and the port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (notify-rust, notify-send, XDG config)
//! - **CLI**: Command-line interface, argument parsing, and logging setup

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
