//! Feed configuration.
//!
//! Loaded from a JSON file named by `FEEDFORGE_CONFIG`; every field is
//! optional and falls back to the defaults.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use feedforge_builder::DispatchMode;
use feedforge_core::{FeedError, FeedResult};

use crate::category::{CategoryDispatcher, CategoryRegistry};
use crate::entity::FeedContext;
use crate::serializer::{DocumentSerializer, RenderOptions};

/// Environment variable holding the path of the JSON config file.
pub const CONFIG_ENV_VAR: &str = "FEEDFORGE_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// How builders treat calls naming nothing they recognize. Carried to
    /// [`FeedContext::dispatch_mode`].
    pub dispatch_mode: DispatchMode,
    #[serde(flatten)]
    pub render: RenderOptions,
    /// Extra or overriding category key → tag entries.
    pub categories: BTreeMap<String, String>,
    pub element_tags: BTreeMap<String, String>,
    pub list_item_tags: BTreeMap<String, String>,
}

impl FeedConfig {
    pub fn from_json_str(json: &str) -> FeedResult<Self> {
        serde_json::from_str(json).map_err(|e| FeedError::config(e.to_string()))
    }

    pub fn from_file(path: &Path) -> FeedResult<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| FeedError::config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    /// Config from the file named by `FEEDFORGE_CONFIG`, or defaults when unset.
    pub fn from_env() -> FeedResult<Self> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => {
                info!(path = %path, "loading feed config");
                Self::from_file(Path::new(&path))
            }
            Err(_) => {
                debug!("{CONFIG_ENV_VAR} not set; using default feed config");
                Ok(Self::default())
            }
        }
    }

    /// Default categories with this config's entries merged on top.
    pub fn category_registry(&self) -> CategoryRegistry {
        let mut registry = CategoryRegistry::default();
        for (key, tag) in &self.categories {
            registry.register(key.as_str(), tag.as_str());
        }
        for (key, tag) in &self.element_tags {
            registry.register_element_tag(key.as_str(), tag.as_str());
        }
        for (key, tag) in &self.list_item_tags {
            registry.register_list_item_tag(key.as_str(), tag.as_str());
        }
        registry
    }

    pub fn context(&self) -> FeedContext {
        FeedContext::new(
            DocumentSerializer::new(self.render),
            CategoryDispatcher::new(self.category_registry()),
        )
        .with_dispatch_mode(self.dispatch_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn empty_json_yields_defaults() {
        let config = FeedConfig::from_json_str("{}").unwrap();
        assert_eq!(config, FeedConfig::default());
        assert_eq!(config.dispatch_mode, DispatchMode::Lenient);
        assert_eq!(config.render, RenderOptions::default());
    }

    #[test]
    fn parses_all_sections() {
        let config = FeedConfig::from_json_str(
            r#"{
                "dispatch_mode": "strict",
                "indent": 2,
                "xml_declaration": true,
                "categories": { "toys": "Toys" },
                "element_tags": { "power_source": "PowerSource" },
                "list_item_tags": { "used_fors": "UsedFor" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.dispatch_mode, DispatchMode::Strict);
        assert_eq!(config.render.indent, Some(2));
        assert!(config.render.xml_declaration);

        let registry = config.category_registry();
        assert_eq!(registry.tag_for("toys"), Some("Toys"));
        assert_eq!(registry.tag_for("ce"), Some("CE"));
        assert_eq!(registry.element_tag("power_source"), "PowerSource");
        assert_eq!(registry.list_item_tag("used_fors"), "UsedFor");
    }

    #[test]
    fn context_carries_dispatch_mode() {
        let config = FeedConfig::from_json_str(r#"{ "dispatch_mode": "strict" }"#).unwrap();
        assert_eq!(config.context().dispatch_mode(), DispatchMode::Strict);
        assert_eq!(FeedConfig::default().context().dispatch_mode(), DispatchMode::Lenient);
    }

    #[test]
    fn context_carries_render_options() {
        let config = FeedConfig {
            render: RenderOptions {
                indent: None,
                xml_declaration: true,
            },
            ..FeedConfig::default()
        };
        let ctx = config.context();
        assert!(ctx.serializer().options().xml_declaration);
        assert!(ctx.categories().registry().contains("fba"));
    }

    #[test]
    fn unknown_dispatch_mode_is_a_config_error() {
        let err = FeedConfig::from_json_str(r#"{ "dispatch_mode": "loose" }"#).unwrap_err();
        assert!(matches!(err, FeedError::Config(_)));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = FeedConfig::from_file(Path::new("/nonexistent/feedforge.json")).unwrap_err();
        assert!(matches!(err, FeedError::Config(_)));
    }

    #[test]
    fn from_env_reads_named_file_or_falls_back_to_defaults() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        write!(
            file,
            r#"{{ "dispatch_mode": "strict", "categories": {{ "toys": "Toys" }} }}"#
        )
        .unwrap();

        let previous = std::env::var_os(CONFIG_ENV_VAR);

        // SAFETY: this is the only test touching FEEDFORGE_CONFIG.
        unsafe { std::env::set_var(CONFIG_ENV_VAR, file.path()) };
        let from_file = FeedConfig::from_env();

        unsafe { std::env::remove_var(CONFIG_ENV_VAR) };
        let from_defaults = FeedConfig::from_env();

        if let Some(value) = previous {
            unsafe { std::env::set_var(CONFIG_ENV_VAR, value) };
        }

        let config = from_file.unwrap();
        assert_eq!(config.dispatch_mode, DispatchMode::Strict);
        assert_eq!(config.categories.get("toys").map(String::as_str), Some("Toys"));
        assert_eq!(config.category_registry().tag_for("toys"), Some("Toys"));

        assert_eq!(from_defaults.unwrap(), FeedConfig::default());
    }
}
