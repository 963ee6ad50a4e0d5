//! Layout sections: ordered, region-partitioned containers of components.
//!
//! A [`Section`] keeps its components grouped by region, in insertion order.
//! It serializes to the storage shape used by layout builder configuration:
//!
//! ```json
//! {
//!   "layout_id": "layout_onecol",
//!   "layout_settings": {},
//!   "components": { "<uuid>": { "uuid": "<uuid>", "region": "content", ... } }
//! }
//! ```
//!
//! When read back, components are grouped by region in order of first
//! appearance and ordered by ascending weight within each region.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::component::{Component, Settings};

/// Layout template of the default one-column section.
pub const DEFAULT_LAYOUT: &str = "layout_onecol";

/// The single region of the default one-column layout.
pub const DEFAULT_REGION: &str = "content";

/// An ordered container of components keyed by region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SectionData", into = "SectionData")]
pub struct Section {
    layout_id: String,
    layout_settings: Settings,
    regions: IndexMap<String, Vec<Component>>,
    third_party_settings: Settings,
}

impl Section {
    /// Creates a new section from a list of components.
    ///
    /// Components are placed into their own regions in the given order.
    ///
    /// # Arguments
    ///
    /// * `layout_id` - Layout template id, e.g. [`DEFAULT_LAYOUT`].
    /// * `layout_settings` - Settings handed to the layout template.
    /// * `components` - Components to place in the section.
    pub fn new(
        layout_id: impl Into<String>,
        layout_settings: Settings,
        components: Vec<Component>,
    ) -> Self {
        let mut section = Self {
            layout_id: layout_id.into(),
            layout_settings,
            regions: IndexMap::new(),
            third_party_settings: Settings::new(),
        };
        for component in components {
            section.append_component(component);
        }
        section
    }

    /// Appends a component to the end of its region.
    pub fn append_component(&mut self, component: Component) {
        self.regions
            .entry(component.region().to_string())
            .or_default()
            .push(component);
    }

    pub fn layout_id(&self) -> &str {
        &self.layout_id
    }

    pub fn layout_settings(&self) -> &Settings {
        &self.layout_settings
    }

    pub fn third_party_settings(&self) -> &Settings {
        &self.third_party_settings
    }

    /// Returns the components of a region, in order. Unknown regions are empty.
    pub fn region(&self, region: &str) -> &[Component] {
        self.regions.get(region).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns an iterator over non-empty regions and their components.
    pub fn regions(&self) -> impl Iterator<Item = (&str, &[Component])> {
        self.regions
            .iter()
            .map(|(region, components)| (region.as_str(), components.as_slice()))
    }

    /// Returns an iterator over all components, region by region.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.regions.values().flatten()
    }

    /// Returns the total number of components in the section.
    pub fn component_count(&self) -> usize {
        self.regions.values().map(Vec::len).sum()
    }

    /// Returns `true` if the section holds no components.
    pub fn is_empty(&self) -> bool {
        self.component_count() == 0
    }
}

impl Default for Section {
    fn default() -> Self {
        Self::new(DEFAULT_LAYOUT, Settings::new(), Vec::new())
    }
}

/// Storage shape of a [`Section`].
#[derive(Debug, Serialize, Deserialize)]
struct SectionData {
    layout_id: String,

    #[serde(default)]
    layout_settings: Settings,

    #[serde(default)]
    components: IndexMap<String, Component>,

    #[serde(default, skip_serializing_if = "Settings::is_empty")]
    third_party_settings: Settings,
}

impl From<SectionData> for Section {
    fn from(data: SectionData) -> Self {
        let mut regions: IndexMap<String, Vec<Component>> = IndexMap::new();
        for component in data.components.into_values() {
            regions
                .entry(component.region().to_string())
                .or_default()
                .push(component);
        }
        // Stable, so equal weights keep their stored order.
        for components in regions.values_mut() {
            components.sort_by_key(Component::weight);
        }

        Self {
            layout_id: data.layout_id,
            layout_settings: data.layout_settings,
            regions,
            third_party_settings: data.third_party_settings,
        }
    }
}

impl From<Section> for SectionData {
    fn from(section: Section) -> Self {
        let components = section
            .regions
            .into_values()
            .flatten()
            .map(|component| (component.uuid().to_string(), component))
            .collect();

        Self {
            layout_id: section.layout_id,
            layout_settings: section.layout_settings,
            components,
            third_party_settings: section.third_party_settings,
        }
    }
}
