//! Source rows handed to the layout process steps.
//!
//! A [`SourceRow`] is the slice of a migration row the layout steps read:
//! its id, its source properties and the row constants. Paragraph fields
//! arrive as lists of `{ "value": <paragraph id> }` items; ids may be numbers
//! or numeric strings.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use tessera_core::{component::Settings, identifier::SourceId};

use crate::{config::MigrationMap, error::ResolutionError};

/// Constants attached to a migration row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowConstants {
    /// Row-level paragraph type to migration map.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<MigrationMap>,
}

/// A source row being migrated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRow {
    id: SourceId,

    #[serde(default)]
    properties: Settings,

    #[serde(default)]
    constants: RowConstants,
}

impl SourceRow {
    /// Creates a row without properties or constants.
    pub fn new(id: SourceId) -> Self {
        Self {
            id,
            properties: Settings::new(),
            constants: RowConstants::default(),
        }
    }

    /// Set a source property (builder style).
    pub fn with_property(mut self, name: impl Into<String>, value: Value) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    /// Set the row-level migration map (builder style).
    pub fn with_map(mut self, map: MigrationMap) -> Self {
        self.constants.map = Some(map);
        self
    }

    pub fn id(&self) -> SourceId {
        self.id
    }

    /// Returns a source property.
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    pub fn constants(&self) -> &RowConstants {
        &self.constants
    }

    /// Returns the paragraph ids referenced by `field`, in field order.
    ///
    /// A missing or non-list field references nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::InvalidReference`] for an item without a
    /// usable `value`.
    pub fn paragraph_refs(&self, field: &str) -> Result<Vec<SourceId>, ResolutionError> {
        let Some(Value::Array(items)) = self.property(field) else {
            return Ok(Vec::new());
        };

        items
            .iter()
            .enumerate()
            .map(|(delta, item)| {
                parse_reference(item).ok_or_else(|| ResolutionError::InvalidReference {
                    field: field.to_string(),
                    delta,
                })
            })
            .collect()
    }
}

fn parse_reference(item: &Value) -> Option<SourceId> {
    let id = match item.get("value")? {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };
    id.map(SourceId::new)
}
