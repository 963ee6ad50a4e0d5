//! Tessera - Layout builder migrations for legacy paragraph content.
//!
//! Turns paragraph fields of a legacy site into layout builder sections.
//! Paragraphs are resolved against blocks created by earlier migrations,
//! stored default layouts are applied per bundle, and nested layout values
//! are flattened into the single list of sections a layout field stores.
//!
//! Unresolvable paragraphs do not fail a row: they are skipped and reported
//! as warnings through a [`report::Reporter`].

pub mod builder;
pub mod config;
pub mod memory;
pub mod paragraph_type;
pub mod process;
pub mod report;
pub mod resolver;
pub mod source;

mod error;

pub use tessera_core::{collection, component, identifier, item, section, severity};

pub use error::{
    BackendError, ConfigurationError, MissingDependencyError, ResolutionError, TesseraError,
};

use log::{debug, info, trace};

use builder::SectionBuilder;
use collection::{FlatLayout, LayoutNode};
use config::{AppConfig, MigrationMap};
use identifier::SourceId;
use item::LayoutItem;
use paragraph_type::ParagraphTypeResolver;
use process::SourceRow;
use report::{MissingDependencyHandler, Reporter};
use resolver::ComponentResolver;
use section::Section;
use source::{
    BlockStorage, LayoutConfigStore, MigrateLookup, ParagraphTypeSource, UuidGenerator,
};

/// The external systems a [`LayoutMigrator`] reads from.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub paragraph_types: &'a dyn ParagraphTypeSource,
    pub lookup: &'a dyn MigrateLookup,
    pub blocks: &'a dyn BlockStorage,
    pub layouts: &'a dyn LayoutConfigStore,
    pub uuid: &'a dyn UuidGenerator,
}

impl<'a> Collaborators<'a> {
    /// Uses one backend for every source interface.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tessera::{Collaborators, memory::MemoryStore, source::RandomUuid};
    ///
    /// let store = MemoryStore::new();
    /// let collaborators = Collaborators::from_store(&store, &RandomUuid);
    /// ```
    pub fn from_store<S>(store: &'a S, uuid: &'a dyn UuidGenerator) -> Self
    where
        S: ParagraphTypeSource + MigrateLookup + BlockStorage + LayoutConfigStore,
    {
        Self {
            paragraph_types: store,
            lookup: store,
            blocks: store,
            layouts: store,
            uuid,
        }
    }
}

/// Migrates the layout of source rows.
///
/// A migrator owns the paragraph type cache, so it should live for one
/// migration run. Parallel drivers create one migrator per worker.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use tessera::{
///     Collaborators, LayoutMigrator,
///     config::{AppConfig, DefaultLayoutConfig, MigrationMap, ParagraphsConfig},
///     identifier::SourceId,
///     memory::MemoryStore,
///     process::SourceRow,
///     report::MessageLog,
///     source::RandomUuid,
/// };
///
/// let store = MemoryStore::new()
///     .with_paragraph(11, "text")
///     .with_id_map("d7_paragraph_text", 11, 5)
///     .with_block(5, "text", &[50]);
///
/// let mut map = MigrationMap::new();
/// map.insert("text".to_string(), "d7_paragraph_text".to_string());
/// let config = AppConfig::new(
///     ParagraphsConfig::new("field_paragraphs", map),
///     DefaultLayoutConfig::default(),
/// );
///
/// let mut migrator = LayoutMigrator::new(config, Collaborators::from_store(&store, &RandomUuid));
/// let row = SourceRow::new(SourceId::new(1))
///     .with_property("field_paragraphs", json!([{ "value": 11 }]));
///
/// let mut log = MessageLog::new();
/// let layout = migrator.migrate_row(&row, &mut log).expect("Failed to migrate row");
/// assert_eq!(layout.len(), 1);
/// assert_eq!(layout[0].component_count(), 1);
/// ```
pub struct LayoutMigrator<'a> {
    config: AppConfig,
    types: ParagraphTypeResolver<'a>,
    components: ComponentResolver<'a>,
    sections: SectionBuilder<'a>,
}

impl<'a> LayoutMigrator<'a> {
    /// Creates a migrator with a fresh paragraph type cache.
    ///
    /// # Arguments
    ///
    /// * `config` - Process step configuration.
    /// * `collaborators` - The systems the migrator reads from.
    pub fn new(config: AppConfig, collaborators: Collaborators<'a>) -> Self {
        Self {
            config,
            types: ParagraphTypeResolver::new(collaborators.paragraph_types),
            components: ComponentResolver::new(
                collaborators.lookup,
                collaborators.blocks,
                collaborators.uuid,
            ),
            sections: SectionBuilder::new(collaborators.layouts),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the paragraph type resolver and its cache.
    pub fn paragraph_types(&self) -> &ParagraphTypeResolver<'a> {
        &self.types
    }

    /// Clears the paragraph type cache.
    pub fn reset_cache(&mut self) {
        self.types.reset();
    }

    /// Builds one section from paragraph references, in source order.
    ///
    /// Every paragraph whose type, migration or block cannot be found is
    /// skipped and reported as a warning. The section uses the configured
    /// layout and region.
    ///
    /// # Arguments
    ///
    /// * `items` - Paragraph ids; the position of an id is its delta.
    /// * `map` - Paragraph type to migration id map.
    /// * `reporter` - Receives a warning for every skipped paragraph.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::Resolution`] or [`TesseraError::Backend`] when
    /// a paragraph cannot be resolved for any reason other than a missing
    /// dependency. Nothing is reported in that case.
    pub fn transform_paragraphs_to_section(
        &mut self,
        items: &[SourceId],
        map: &MigrationMap,
        reporter: &mut dyn Reporter,
    ) -> Result<Section, TesseraError> {
        let paragraphs = self.config.paragraphs();
        let mut section = SectionBuilder::new_section_with_layout(
            Vec::new(),
            paragraphs.layout(),
            Default::default(),
        );
        let region = paragraphs.region().to_string();

        for (delta, &source_id) in items.iter().enumerate() {
            match self.resolve_paragraph(source_id, delta as i64, map, &region) {
                Ok(component) => section.append_component(component),
                Err(TesseraError::MissingDependency(err)) => {
                    MissingDependencyHandler::handle(&err, reporter);
                }
                Err(err) => return Err(err),
            }
        }

        debug!(
            items = items.len(),
            components = section.component_count();
            "Paragraphs transformed to section"
        );
        Ok(section)
    }

    /// Returns the stored default sections of `bundle`; empty if none are stored.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::Configuration`] if the stored layout is malformed.
    pub fn default_sections_for(&self, bundle: &str) -> Result<Vec<Section>, TesseraError> {
        self.sections.load_defaults(bundle)
    }

    /// Flattens a raw layout value into a list of sections.
    pub fn flatten(raw: LayoutNode) -> FlatLayout {
        collection::flatten(raw)
    }

    /// Runs the paragraphs step for a row.
    ///
    /// The migration map comes from the row constants, falling back to the
    /// configured map.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::Configuration`] before any lookup if the source
    /// field or the migration map is not configured.
    pub fn paragraphs_layout(
        &mut self,
        row: &SourceRow,
        reporter: &mut dyn Reporter,
    ) -> Result<Section, TesseraError> {
        let paragraphs = self.config.paragraphs();
        let source_field = paragraphs.source_field()?;
        let map = match &row.constants().map {
            Some(map) => map.clone(),
            None if !paragraphs.map().is_empty() => paragraphs.map().clone(),
            None => {
                return Err(ConfigurationError::MissingKey {
                    key: "map",
                    step: "paragraphs_layout",
                }
                .into());
            }
        };

        let items = row.paragraph_refs(source_field)?;
        trace!(row_id = row.id().get(), field = source_field, items = items.len(); "Paragraph references read");

        self.transform_paragraphs_to_section(&items, &map, reporter)
    }

    /// Runs the default layout step.
    ///
    /// Without a configured bundle `value` passes through unchanged. With a
    /// bundle, the value is replaced by the stored default sections, or by an
    /// empty placeholder if the bundle has none.
    pub fn default_layout(&self, value: LayoutNode) -> Result<LayoutNode, TesseraError> {
        let Some(bundle) = self.config.defaults().bundle() else {
            return Ok(value);
        };

        let sections = self.default_sections_for(bundle)?;
        if sections.is_empty() {
            return Ok(LayoutNode::Empty);
        }
        Ok(LayoutNode::leaves(sections))
    }

    /// Migrates the layout of a row.
    ///
    /// The layout is the default layout followed by the paragraphs section,
    /// flattened into a single list. The default layout is loaded before any
    /// paragraph is resolved.
    ///
    /// # Errors
    ///
    /// Fails on configuration errors, inconsistent data and backend failures.
    /// Missing dependencies are only reported.
    pub fn migrate_row(
        &mut self,
        row: &SourceRow,
        reporter: &mut dyn Reporter,
    ) -> Result<FlatLayout, TesseraError> {
        info!(row_id = row.id().get(); "Migrating row layout");

        let defaults = self.default_layout(LayoutNode::Empty)?;
        let paragraphs = self.paragraphs_layout(row, reporter)?;

        let layout = Self::flatten(LayoutNode::branch([defaults, LayoutNode::leaf(paragraphs)]));
        debug!(row_id = row.id().get(), sections = layout.len(); "Row layout migrated");
        Ok(layout)
    }

    fn resolve_paragraph(
        &mut self,
        source_id: SourceId,
        delta: i64,
        map: &MigrationMap,
        region: &str,
    ) -> Result<component::Component, TesseraError> {
        let paragraph_type = self
            .types
            .resolve_type(source_id)?
            .ok_or(MissingDependencyError::ParagraphType { source_id })?;

        let Some(migration) = map.get(&paragraph_type) else {
            return Err(MissingDependencyError::UnmappedType {
                paragraph_type,
                source_id,
            }
            .into());
        };

        let item = LayoutItem::new(paragraph_type.as_str(), source_id, delta, migration.as_str());
        self.components.resolve(&item, region)
    }
}
