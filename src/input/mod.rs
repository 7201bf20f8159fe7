//! Input layer
//!
//! Everything the outside world can tell the shell, as one event type.

pub mod events;

pub use events::ShellEvent;
