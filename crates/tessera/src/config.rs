//! Configuration types for Tessera layout migrations.
//!
//! These structures configure the two layout process steps. All types
//! implement [`serde::Deserialize`] for loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining both steps.
//! - [`ParagraphsConfig`] - Source field, target layout/region and the
//!   paragraph type to migration map of the paragraphs step.
//! - [`DefaultLayoutConfig`] - Bundle whose stored default layout is applied.
//!
//! # Example
//!
//! ```toml
//! [paragraphs]
//! source_field = "field_paragraphs"
//! region = "content"
//! layout = "layout_onecol"
//!
//! [paragraphs.map]
//! text = "d7_paragraph_text"
//! image = "d7_paragraph_image"
//!
//! [defaults]
//! bundle = "page"
//! ```

use indexmap::IndexMap;
use serde::Deserialize;

use tessera_core::section::{DEFAULT_LAYOUT, DEFAULT_REGION};

use crate::error::ConfigurationError;

/// Maps a paragraph type to the id of the migration that migrated it.
pub type MigrationMap = IndexMap<String, String>;

/// Top-level configuration combining both layout process steps.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Paragraphs step configuration section.
    #[serde(default)]
    paragraphs: ParagraphsConfig,

    /// Default layout step configuration section.
    #[serde(default)]
    defaults: DefaultLayoutConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the given step configurations.
    pub fn new(paragraphs: ParagraphsConfig, defaults: DefaultLayoutConfig) -> Self {
        Self {
            paragraphs,
            defaults,
        }
    }

    /// Returns the paragraphs step configuration.
    pub fn paragraphs(&self) -> &ParagraphsConfig {
        &self.paragraphs
    }

    /// Returns the default layout step configuration.
    pub fn defaults(&self) -> &DefaultLayoutConfig {
        &self.defaults
    }
}

/// Configuration of the paragraphs layout step.
#[derive(Debug, Clone, Deserialize)]
pub struct ParagraphsConfig {
    /// Source field holding the paragraph references.
    #[serde(default)]
    source_field: Option<String>,

    /// Region migrated components are placed in.
    #[serde(default = "default_region")]
    region: String,

    /// Layout template of the generated section.
    #[serde(default = "default_layout")]
    layout: String,

    /// Paragraph type to migration id map.
    #[serde(default)]
    map: MigrationMap,
}

impl ParagraphsConfig {
    /// Creates a new [`ParagraphsConfig`] using the one-column layout.
    ///
    /// # Arguments
    ///
    /// * `source_field` - Source field holding the paragraph references.
    /// * `map` - Paragraph type to migration id map.
    pub fn new(source_field: impl Into<String>, map: MigrationMap) -> Self {
        Self {
            source_field: Some(source_field.into()),
            map,
            ..Self::default()
        }
    }

    /// Place components in `region` (builder style).
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Use `layout` as the section template (builder style).
    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = layout.into();
        self
    }

    /// Returns the configured source field.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingKey`] if no source field is set.
    pub fn source_field(&self) -> Result<&str, ConfigurationError> {
        self.source_field
            .as_deref()
            .ok_or(ConfigurationError::MissingKey {
                key: "source_field",
                step: "paragraphs_layout",
            })
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn layout(&self) -> &str {
        &self.layout
    }

    pub fn map(&self) -> &MigrationMap {
        &self.map
    }
}

impl Default for ParagraphsConfig {
    fn default() -> Self {
        Self {
            source_field: None,
            region: default_region(),
            layout: default_layout(),
            map: MigrationMap::new(),
        }
    }
}

/// Configuration of the default layout step.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DefaultLayoutConfig {
    /// Bundle whose stored default layout is applied.
    #[serde(default)]
    bundle: Option<String>,
}

impl DefaultLayoutConfig {
    /// Creates a new [`DefaultLayoutConfig`] for a bundle.
    pub fn new(bundle: impl Into<String>) -> Self {
        Self {
            bundle: Some(bundle.into()),
        }
    }

    /// Returns the bundle, or `None` if the step passes values through.
    pub fn bundle(&self) -> Option<&str> {
        self.bundle.as_deref().filter(|bundle| !bundle.is_empty())
    }
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_layout() -> String {
    DEFAULT_LAYOUT.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert!(config.paragraphs().source_field().is_err());
        assert_eq!(config.paragraphs().region(), "content");
        assert_eq!(config.paragraphs().layout(), "layout_onecol");
        assert!(config.paragraphs().map().is_empty());
        assert_eq!(config.defaults().bundle(), None);
    }

    #[test]
    fn test_empty_bundle_passes_through() {
        let config = DefaultLayoutConfig::new("");
        assert_eq!(config.bundle(), None);
    }

    #[test]
    fn test_builder_style() {
        let mut map = MigrationMap::new();
        map.insert("text".to_string(), "d7_paragraph_text".to_string());

        let config = ParagraphsConfig::new("field_body", map)
            .with_region("first")
            .with_layout("layout_twocol_section");

        assert_eq!(config.source_field().ok(), Some("field_body"));
        assert_eq!(config.region(), "first");
        assert_eq!(config.layout(), "layout_twocol_section");
        assert_eq!(config.map()["text"], "d7_paragraph_text");
    }
}
