use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::app::state::Orientation;
use crate::domain::deep_link::{DEFAULT_PREFIXES, DeepLinkParser};

pub const ENV_LINK_DELAY_MS: &str = "TABLET_SHELL_LINK_DELAY_MS";
pub const ENV_DEEP_LINK_PREFIXES: &str = "TABLET_SHELL_DEEP_LINK_PREFIXES";
pub const ENV_LOG: &str = "TABLET_SHELL_LOG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid shell configuration JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Environment variable {name} has invalid value {value:?}")]
    InvalidEnv { name: &'static str, value: String },
}

/// Flex weights of the two panels for each orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub landscape_master: u32,
    pub landscape_detail: u32,
    pub portrait_master: u32,
    pub portrait_detail: u32,
}

impl LayoutConfig {
    pub const MIN_WEIGHT: u32 = 1;
    pub const MAX_WEIGHT: u32 = 12;

    pub fn sanitize_weight(value: u32) -> u32 {
        value.clamp(Self::MIN_WEIGHT, Self::MAX_WEIGHT)
    }

    pub fn sanitized(self) -> Self {
        Self {
            landscape_master: Self::sanitize_weight(self.landscape_master),
            landscape_detail: Self::sanitize_weight(self.landscape_detail),
            portrait_master: Self::sanitize_weight(self.portrait_master),
            portrait_detail: Self::sanitize_weight(self.portrait_detail),
        }
    }

    /// (master, detail) weights for an orientation
    pub fn weights(&self, orientation: Orientation) -> (u32, u32) {
        match orientation {
            Orientation::Landscape => (self.landscape_master, self.landscape_detail),
            Orientation::Portrait => (self.portrait_master, self.portrait_detail),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            landscape_master: 4,
            landscape_detail: 9,
            portrait_master: 5,
            portrait_detail: 7,
        }
    }
}

/// Runtime configuration of the shell
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Delay after launch before live URL events are accepted
    pub link_listener_delay_ms: u64,
    pub deep_link_prefixes: Vec<String>,
    pub layout: LayoutConfig,
    pub log_filter: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            link_listener_delay_ms: Self::DEFAULT_LINK_DELAY_MS,
            deep_link_prefixes: DEFAULT_PREFIXES.iter().map(|p| p.to_string()).collect(),
            layout: LayoutConfig::default(),
            log_filter: "tablet_shell=info".to_string(),
        }
    }
}

impl ShellConfig {
    pub const DEFAULT_LINK_DELAY_MS: u64 = 5_000;

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: ShellConfig = serde_json::from_str(raw)?;
        Ok(config.sanitized())
    }

    /// Defaults overridden by `TABLET_SHELL_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as `from_env` with an injectable variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_LINK_DELAY_MS) {
            config.link_listener_delay_ms =
                value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                    name: ENV_LINK_DELAY_MS,
                    value: value.clone(),
                })?;
        }
        if let Some(value) = lookup(ENV_DEEP_LINK_PREFIXES) {
            config.deep_link_prefixes = value.split(',').map(|p| p.trim().to_string()).collect();
        }
        if let Some(value) = lookup(ENV_LOG) {
            config.log_filter = value;
        }

        Ok(config.sanitized())
    }

    pub fn sanitized(mut self) -> Self {
        self.layout = self.layout.sanitized();
        self.deep_link_prefixes.retain(|prefix| !prefix.trim().is_empty());
        if self.deep_link_prefixes.is_empty() {
            self.deep_link_prefixes = Self::default().deep_link_prefixes;
        }
        if self.log_filter.trim().is_empty() {
            self.log_filter = Self::default().log_filter;
        }
        self
    }

    pub fn link_listener_delay(&self) -> Duration {
        Duration::from_millis(self.link_listener_delay_ms)
    }

    pub fn deep_link_parser(&self) -> DeepLinkParser {
        DeepLinkParser::new(self.deep_link_prefixes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_tablet_proportions() {
        let config = ShellConfig::default();
        assert_eq!(config.link_listener_delay(), Duration::from_secs(5));
        assert_eq!(config.layout.weights(Orientation::Landscape), (4, 9));
        assert_eq!(config.layout.weights(Orientation::Portrait), (5, 7));
    }

    #[test]
    fn json_overrides_are_partial_and_sanitized() {
        let config = ShellConfig::from_json_str(
            r#"{"link_listener_delay_ms": 250, "layout": {"landscape_master": 40}, "deep_link_prefixes": [" "]}"#,
        )
        .unwrap();
        assert_eq!(config.link_listener_delay_ms, 250);
        assert_eq!(config.layout.landscape_master, LayoutConfig::MAX_WEIGHT);
        assert_eq!(config.layout.portrait_detail, 7);
        assert_eq!(config.deep_link_prefixes, ShellConfig::default().deep_link_prefixes);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(
            ShellConfig::from_json_str("{"),
            Err(ConfigError::InvalidJson(_))
        ));
    }

    #[test]
    fn environment_overrides_apply() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ENV_LINK_DELAY_MS, "100"),
            (ENV_DEEP_LINK_PREFIXES, "myapp://, https://go.example.com/"),
            (ENV_LOG, "tablet_shell=debug"),
        ]);
        let config = ShellConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap();
        assert_eq!(config.link_listener_delay_ms, 100);
        assert_eq!(
            config.deep_link_prefixes,
            vec!["myapp://".to_string(), "https://go.example.com/".to_string()]
        );
        assert_eq!(config.log_filter, "tablet_shell=debug");
        assert!(config.deep_link_parser().parse("myapp://room?rid=1").is_some());
    }

    #[test]
    fn malformed_delay_is_rejected() {
        let result = ShellConfig::from_lookup(|name| {
            (name == ENV_LINK_DELAY_MS).then(|| "soon".to_string())
        });
        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnv { name: ENV_LINK_DELAY_MS, .. })
        ));
    }
}
