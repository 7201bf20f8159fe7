//! Application orchestration layer
//!
//! This module coordinates routing, session state, startup and the event loop.
//! It owns both navigation stacks and the single session state.

pub mod bootstrap;
pub mod controller;
pub mod reporting;
pub mod router;
pub mod runtime;
pub mod state;

pub use bootstrap::{BootstrapSequencer, InitialAction, LinkListenerGate};
pub use controller::{AppError, ShellController};
pub use router::{Router, Verdict};
pub use runtime::ShellRuntime;
pub use state::{Orientation, SessionState};
