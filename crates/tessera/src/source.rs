//! Narrow interfaces to the systems a layout migration reads from.
//!
//! Each trait covers one capability. The migrator only ever reads through
//! them; retries, connection handling and caching beyond the paragraph type
//! cache belong to the implementations.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use tessera_core::identifier::{EntityId, RevisionId, SourceId};

use crate::error::BackendError;

/// Read-only access to the legacy paragraph table.
pub trait ParagraphTypeSource {
    /// Returns the bundle of a source paragraph, or `None` if it does not exist.
    fn paragraph_type(&self, id: SourceId) -> Result<Option<String>, BackendError>;
}

/// One row of a migration id map: the destination created for a source id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correspondence {
    pub id: EntityId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<RevisionId>,
}

impl Correspondence {
    pub fn new(id: EntityId) -> Self {
        Self { id, revision: None }
    }
}

/// Lookup of destination ids in the id maps of earlier migrations.
pub trait MigrateLookup {
    /// Returns every destination recorded for `source_ids` in `migration`.
    ///
    /// An empty result means the source was never migrated.
    fn lookup(
        &self,
        migration: &str,
        source_ids: &[SourceId],
    ) -> Result<Vec<Correspondence>, BackendError>;
}

/// Point reads against migrated block content.
pub trait BlockStorage {
    /// Returns the bundle of a block without loading the whole entity.
    fn block_type(&self, id: EntityId) -> Result<Option<String>, BackendError>;

    /// Returns the latest revision of a block.
    fn latest_revision_id(&self, id: EntityId) -> Result<Option<RevisionId>, BackendError>;
}

/// Access to stored default layouts.
pub trait LayoutConfigStore {
    /// Returns the raw default layout sections configured for a bundle.
    fn layout_config(&self, bundle: &str) -> Result<Option<Value>, BackendError>;
}

/// Source of component uuids.
pub trait UuidGenerator {
    fn generate(&self) -> Uuid;
}

/// Generates random (version 4) uuids.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomUuid;

impl UuidGenerator for RandomUuid {
    fn generate(&self) -> Uuid {
        Uuid::new_v4()
    }
}
