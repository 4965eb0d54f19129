use std::path::PathBuf;

use anyhow::{Context, Result};
use trigon_engine::logging::LoggingConfig;
use trigon_engine::render::SceneVariant;
use trigon_engine::window::default_resource_dir;

/// Selects the scene: `triangle` or `quad`.
pub const VARIANT_VAR: &str = "TRIGON_VARIANT";
/// Directory holding `quad.wgsl`.
pub const RESOURCE_DIR_VAR: &str = "TRIGON_RESOURCE_DIR";
/// Log filter, `env_logger` syntax. Takes precedence over `RUST_LOG`.
pub const LOG_VAR: &str = "TRIGON_LOG";

/// Demo settings read from the environment.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub variant: SceneVariant,
    pub resource_dir: PathBuf,
    pub logging: LoggingConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            variant: SceneVariant::default(),
            resource_dir: default_resource_dir(),
            logging: LoggingConfig::default(),
        }
    }
}

impl DemoConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from `lookup`; unset or empty keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(raw) = get(VARIANT_VAR) {
            config.variant = raw
                .parse()
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("invalid {VARIANT_VAR}"))?;
        }

        if let Some(dir) = get(RESOURCE_DIR_VAR) {
            config.resource_dir = PathBuf::from(dir);
        }

        config.logging.env_filter = get(LOG_VAR);

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = DemoConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.variant, SceneVariant::Quad);
        assert_eq!(config.resource_dir, default_resource_dir());
        assert!(config.logging.env_filter.is_none());
    }

    #[test]
    fn variables_override_defaults() {
        let config = DemoConfig::from_lookup(lookup(&[
            (VARIANT_VAR, " Triangle "),
            (RESOURCE_DIR_VAR, "/tmp/res"),
            (LOG_VAR, "debug"),
        ]))
        .unwrap();

        assert_eq!(config.variant, SceneVariant::Triangle);
        assert_eq!(config.resource_dir, PathBuf::from("/tmp/res"));
        assert_eq!(config.logging.env_filter.as_deref(), Some("debug"));
    }

    #[test]
    fn unknown_variant_is_an_error() {
        let err = DemoConfig::from_lookup(lookup(&[(VARIANT_VAR, "hexagon")])).unwrap_err();
        assert!(format!("{err:#}").contains("hexagon"));
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = DemoConfig::from_lookup(lookup(&[(VARIANT_VAR, "  ")])).unwrap();
        assert_eq!(config.variant, SceneVariant::Quad);
    }
}
