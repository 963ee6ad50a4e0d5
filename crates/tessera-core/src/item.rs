//! Provides [`LayoutItem`], a single source element waiting to be resolved.

use crate::identifier::SourceId;

/// A reference to one source element that has to become a layout component.
///
/// Carries the source bundle, the source id, its position inside the source
/// field and the migration whose id map resolves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutItem {
    item_type: String,
    source_id: SourceId,
    delta: i64,
    migration: String,
}

impl LayoutItem {
    /// Create a new layout item.
    ///
    /// # Arguments
    ///
    /// * `item_type` - Source bundle of the element (e.g. `text`).
    /// * `source_id` - Id of the element in the source.
    /// * `delta` - Ordinal position of the element within its source field.
    /// * `migration` - Id of the migration that migrated the element's target.
    pub fn new(
        item_type: impl Into<String>,
        source_id: SourceId,
        delta: i64,
        migration: impl Into<String>,
    ) -> Self {
        Self {
            item_type: item_type.into(),
            source_id,
            delta,
            migration: migration.into(),
        }
    }

    pub fn item_type(&self) -> &str {
        &self.item_type
    }

    pub fn source_id(&self) -> SourceId {
        self.source_id
    }

    pub fn delta(&self) -> i64 {
        self.delta
    }

    pub fn migration(&self) -> &str {
        &self.migration
    }
}
