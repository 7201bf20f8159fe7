//! Configuration module for tablet-shell
//!
//! Holds the settings shared between bootstrap, layout and logging: the
//! deep-link listener delay, accepted link prefixes and panel proportions.

pub mod shell;

pub use shell::{ConfigError, LayoutConfig, ShellConfig};
