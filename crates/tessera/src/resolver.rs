//! Resolution of layout items into inline block components.
//!
//! An item is resolved in three reads: the migration id map gives the block
//! created for the item, a point read gives the block type, and the block
//! storage gives its latest revision. The resulting [`Component`] embeds that
//! revision as an inline block.

use log::{debug, trace};

use tessera_core::{
    component::{BlockConfiguration, Component},
    identifier::{EntityId, RevisionId, SourceId},
    item::LayoutItem,
};

use crate::{
    error::{MissingDependencyError, ResolutionError, TesseraError},
    source::{BlockStorage, MigrateLookup, UuidGenerator},
};

/// Builds components for layout items from previously migrated blocks.
pub struct ComponentResolver<'a> {
    lookup: &'a dyn MigrateLookup,
    blocks: &'a dyn BlockStorage,
    uuid: &'a dyn UuidGenerator,
}

impl<'a> ComponentResolver<'a> {
    /// Creates a new resolver.
    ///
    /// # Arguments
    ///
    /// * `lookup` - Id maps of earlier migrations.
    /// * `blocks` - Migrated block storage.
    /// * `uuid` - Generator for component uuids.
    pub fn new(
        lookup: &'a dyn MigrateLookup,
        blocks: &'a dyn BlockStorage,
        uuid: &'a dyn UuidGenerator,
    ) -> Self {
        Self {
            lookup,
            blocks,
            uuid,
        }
    }

    /// Resolves `item` into a component placed in `region`.
    ///
    /// The component weight is the item's delta.
    ///
    /// # Errors
    ///
    /// - [`TesseraError::MissingDependency`] if the item's block was never migrated.
    /// - [`TesseraError::Resolution`] if the block has no type or no revision.
    /// - [`TesseraError::Backend`] if a read fails.
    pub fn resolve(&self, item: &LayoutItem, region: &str) -> Result<Component, TesseraError> {
        let block_id = self.lookup_block(item.migration(), item.source_id())?;

        let block_type = self.blocks.block_type(block_id)?.ok_or_else(|| {
            ResolutionError::UnknownBlockType {
                item_type: item.item_type().to_string(),
                source_id: item.source_id(),
                block_id,
            }
        })?;

        let revision_id = self
            .blocks
            .latest_revision_id(block_id)?
            .ok_or(ResolutionError::MissingRevision { block_id })?;

        debug!(
            source_id = item.source_id().get(),
            block_id = block_id.get(),
            block_type = block_type.as_str(),
            revision_id = revision_id.get();
            "Resolved layout item"
        );

        Ok(self.create_component(revision_id, &block_type, item.delta(), region))
    }

    /// Finds the block migrated for `source_id` by `migration`.
    ///
    /// When the id map holds several destinations the first one is used, in
    /// the order the lookup returns them.
    ///
    /// # Errors
    ///
    /// Returns [`MissingDependencyError::Block`] if nothing was migrated.
    pub fn lookup_block(&self, migration: &str, source_id: SourceId) -> Result<EntityId, TesseraError> {
        let correspondences = self.lookup.lookup(migration, &[source_id])?;
        trace!(migration, source_id = source_id.get(), matches = correspondences.len(); "Migration lookup");

        correspondences
            .first()
            .map(|correspondence| correspondence.id)
            .ok_or_else(|| {
                MissingDependencyError::Block {
                    source_id,
                    migration: migration.to_string(),
                }
                .into()
            })
    }

    /// Creates an inline block component embedding `revision_id`.
    pub fn create_component(
        &self,
        revision_id: RevisionId,
        block_type: &str,
        weight: i64,
        region: &str,
    ) -> Component {
        Component::new(
            self.uuid.generate(),
            region,
            weight,
            BlockConfiguration::inline_block(block_type, revision_id),
        )
    }
}
