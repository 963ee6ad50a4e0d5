//! Section assembly and stored default layouts.

use log::debug;
use serde_json::Value;

use tessera_core::{
    component::{Component, Settings},
    section::{DEFAULT_LAYOUT, Section},
};

use crate::{
    error::{ConfigurationError, TesseraError},
    source::LayoutConfigStore,
};

/// Creates sections, either fresh or from a bundle's stored default layout.
pub struct SectionBuilder<'a> {
    layouts: &'a dyn LayoutConfigStore,
}

impl<'a> SectionBuilder<'a> {
    /// Creates a builder reading default layouts from `layouts`.
    pub fn new(layouts: &'a dyn LayoutConfigStore) -> Self {
        Self { layouts }
    }

    /// Creates a one-column section holding `components`.
    pub fn new_section(components: Vec<Component>) -> Section {
        Self::new_section_with_layout(components, DEFAULT_LAYOUT, Settings::new())
    }

    /// Creates a section with an explicit layout template and settings.
    pub fn new_section_with_layout(
        components: Vec<Component>,
        layout: &str,
        settings: Settings,
    ) -> Section {
        Section::new(layout, settings, components)
    }

    /// Loads the default layout sections stored for `bundle`.
    ///
    /// Returns an empty list if the bundle has no stored layout.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::InvalidDefaultLayout`] if the stored layout is malformed.
    /// - [`TesseraError::Backend`] if the configuration read fails.
    pub fn load_defaults(&self, bundle: &str) -> Result<Vec<Section>, TesseraError> {
        let sections = match self.layouts.layout_config(bundle)? {
            None | Some(Value::Null) => Vec::new(),
            Some(raw) => serde_json::from_value::<Vec<Section>>(raw).map_err(|source| {
                ConfigurationError::InvalidDefaultLayout {
                    bundle: bundle.to_string(),
                    source,
                }
            })?,
        };

        debug!(bundle, sections = sections.len(); "Loaded default layout");
        Ok(sections)
    }
}
