//! Split-view navigation core for a tablet chat client
//!
//! Keeps the master (room list) and detail (content) stacks coordinated,
//! decides where every navigation intent lands and resolves the launch
//! target at startup.

pub mod app;
pub mod config;
pub mod domain;
pub mod input;
pub mod logging;
pub mod ui;
