//! An in-memory backend implementing every source interface.
//!
//! [`MemoryStore`] holds a snapshot of everything a layout migration reads:
//! paragraph bundles, migration id maps, migrated blocks and stored default
//! layouts. It deserializes from JSON:
//!
//! ```json
//! {
//!   "paragraphs": { "11": "text" },
//!   "id_maps": { "d7_paragraph_text": { "11": [{ "id": 5 }] } },
//!   "blocks": { "5": { "type": "text", "revisions": [50, 52] } },
//!   "layouts": { "page": [{ "layout_id": "layout_onecol" }] }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use tessera_core::identifier::{EntityId, RevisionId, SourceId};

use crate::{
    error::BackendError,
    source::{BlockStorage, Correspondence, LayoutConfigStore, MigrateLookup, ParagraphTypeSource},
};

/// A migrated block as seen by the block storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredBlock {
    #[serde(rename = "type")]
    block_type: String,

    #[serde(default)]
    revisions: Vec<RevisionId>,
}

impl StoredBlock {
    pub fn new(block_type: impl Into<String>, revisions: Vec<RevisionId>) -> Self {
        Self {
            block_type: block_type.into(),
            revisions,
        }
    }
}

/// Snapshot of the data a layout migration reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryStore {
    #[serde(default)]
    paragraphs: BTreeMap<SourceId, String>,

    #[serde(default)]
    id_maps: BTreeMap<String, BTreeMap<SourceId, Vec<Correspondence>>>,

    #[serde(default)]
    blocks: BTreeMap<EntityId, StoredBlock>,

    #[serde(default)]
    layouts: BTreeMap<String, Value>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source paragraph (builder style).
    pub fn with_paragraph(mut self, id: u64, paragraph_type: impl Into<String>) -> Self {
        self.paragraphs.insert(SourceId::new(id), paragraph_type.into());
        self
    }

    /// Record that `migration` migrated source `source` to block `block` (builder style).
    pub fn with_id_map(mut self, migration: impl Into<String>, source: u64, block: u64) -> Self {
        self.id_maps
            .entry(migration.into())
            .or_default()
            .entry(SourceId::new(source))
            .or_default()
            .push(Correspondence::new(EntityId::new(block)));
        self
    }

    /// Add a migrated block with its revisions (builder style).
    pub fn with_block(mut self, id: u64, block_type: impl Into<String>, revisions: &[u64]) -> Self {
        let revisions = revisions.iter().copied().map(RevisionId::new).collect();
        self.blocks
            .insert(EntityId::new(id), StoredBlock::new(block_type, revisions));
        self
    }

    /// Store a default layout for a bundle (builder style).
    pub fn with_layout(mut self, bundle: impl Into<String>, sections: Value) -> Self {
        self.layouts.insert(bundle.into(), sections);
        self
    }
}

impl ParagraphTypeSource for MemoryStore {
    fn paragraph_type(&self, id: SourceId) -> Result<Option<String>, BackendError> {
        Ok(self.paragraphs.get(&id).cloned())
    }
}

impl MigrateLookup for MemoryStore {
    fn lookup(
        &self,
        migration: &str,
        source_ids: &[SourceId],
    ) -> Result<Vec<Correspondence>, BackendError> {
        let Some(id_map) = self.id_maps.get(migration) else {
            return Err(BackendError::new(format!(
                "Migration {migration} does not exist"
            )));
        };

        Ok(source_ids
            .iter()
            .filter_map(|source_id| id_map.get(source_id))
            .flatten()
            .copied()
            .collect())
    }
}

impl BlockStorage for MemoryStore {
    fn block_type(&self, id: EntityId) -> Result<Option<String>, BackendError> {
        Ok(self
            .blocks
            .get(&id)
            .map(|block| block.block_type.clone())
            .filter(|block_type| !block_type.is_empty()))
    }

    fn latest_revision_id(&self, id: EntityId) -> Result<Option<RevisionId>, BackendError> {
        Ok(self
            .blocks
            .get(&id)
            .and_then(|block| block.revisions.iter().max().copied()))
    }
}

impl LayoutConfigStore for MemoryStore {
    fn layout_config(&self, bundle: &str) -> Result<Option<Value>, BackendError> {
        Ok(self.layouts.get(bundle).cloned())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_store_from_json() {
        let store: MemoryStore = serde_json::from_value(json!({
            "paragraphs": { "11": "text" },
            "id_maps": { "d7_paragraph_text": { "11": [{ "id": 5, "revision": 50 }] } },
            "blocks": { "5": { "type": "text", "revisions": [50, 52] } },
            "layouts": { "page": [] }
        }))
        .expect("Failed to parse store");

        assert_eq!(
            store.paragraph_type(SourceId::new(11)).unwrap().as_deref(),
            Some("text")
        );
        assert_eq!(
            store
                .lookup("d7_paragraph_text", &[SourceId::new(11)])
                .unwrap(),
            vec![Correspondence {
                id: EntityId::new(5),
                revision: Some(RevisionId::new(50)),
            }]
        );
        assert_eq!(
            store.latest_revision_id(EntityId::new(5)).unwrap(),
            Some(RevisionId::new(52))
        );
        assert_eq!(store.layout_config("page").unwrap(), Some(json!([])));
    }

    #[test]
    fn test_lookup_of_unmigrated_source_is_empty() {
        let store = MemoryStore::new().with_id_map("d7_paragraph_text", 11, 5);

        assert!(
            store
                .lookup("d7_paragraph_text", &[SourceId::new(12)])
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_lookup_of_unknown_migration_fails() {
        let store = MemoryStore::new();

        assert!(store.lookup("d7_paragraph_quote", &[SourceId::new(1)]).is_err());
    }

    #[test]
    fn test_block_without_revisions() {
        let store = MemoryStore::new().with_block(5, "text", &[]);

        assert_eq!(store.block_type(EntityId::new(5)).unwrap().as_deref(), Some("text"));
        assert_eq!(store.latest_revision_id(EntityId::new(5)).unwrap(), None);
        assert_eq!(store.block_type(EntityId::new(6)).unwrap(), None);
    }
}
