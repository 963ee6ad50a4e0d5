//! Layout components and their block display configuration.
//!
//! A [`Component`] is one placeable unit inside a section region. The block it
//! renders is described by a [`BlockConfiguration`], which mirrors the
//! configuration array stored by the layout builder. Keys that this crate does
//! not interpret are kept in the configuration's settings map so stored
//! layouts survive a load/save cycle unchanged.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::identifier::RevisionId;

/// Free-form settings map, as stored in layout configuration.
pub type Settings = serde_json::Map<String, Value>;

/// Plugin id prefix of blocks embedded inline in a layout.
pub const INLINE_BLOCK_PREFIX: &str = "inline_block:";

/// View mode used when rendering migrated inline blocks.
pub const FULL_VIEW_MODE: &str = "full";

const INLINE_BLOCK_LABEL: &str = "Layout Builder Inline Block";
const LAYOUT_BUILDER_PROVIDER: &str = "layout_builder";
const LABEL_HIDDEN: &str = "0";
const VIEW_MODE_KEY: &str = "view_mode";
const BLOCK_REVISION_KEY: &str = "block_revision_id";

/// Display configuration of the block placed by a [`Component`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockConfiguration {
    /// Block plugin id, e.g. `inline_block:text`.
    id: String,

    /// Every other configuration key, preserved verbatim.
    #[serde(flatten)]
    settings: Settings,
}

impl BlockConfiguration {
    /// Creates the configuration of an inline block embedding a block revision.
    ///
    /// The block is rendered in the full view mode with its label hidden and
    /// without any context mapping.
    ///
    /// # Arguments
    ///
    /// * `block_type` - Block bundle, appended to the `inline_block:` plugin id.
    /// * `revision_id` - Revision of the block to embed.
    pub fn inline_block(block_type: &str, revision_id: RevisionId) -> Self {
        let mut settings = Settings::new();
        settings.insert("label".to_string(), Value::from(INLINE_BLOCK_LABEL));
        settings.insert(
            "provider".to_string(),
            Value::from(LAYOUT_BUILDER_PROVIDER),
        );
        settings.insert("label_display".to_string(), Value::from(LABEL_HIDDEN));
        settings.insert(VIEW_MODE_KEY.to_string(), Value::from(FULL_VIEW_MODE));
        settings.insert(
            BLOCK_REVISION_KEY.to_string(),
            Value::from(revision_id.get()),
        );
        settings.insert("block_serialized".to_string(), Value::Null);
        settings.insert(
            "context_mapping".to_string(),
            Value::Object(Settings::new()),
        );

        Self {
            id: format!("{INLINE_BLOCK_PREFIX}{block_type}"),
            settings,
        }
    }

    /// Returns the block plugin id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the embedded block type, if this is an inline block.
    pub fn target_type(&self) -> Option<&str> {
        self.id.strip_prefix(INLINE_BLOCK_PREFIX)
    }

    /// Returns the embedded block revision, if any.
    ///
    /// Stored configuration may hold the id as a number or a numeric string.
    pub fn block_revision_id(&self) -> Option<RevisionId> {
        let id = match self.settings.get(BLOCK_REVISION_KEY)? {
            Value::Number(number) => number.as_u64(),
            Value::String(text) => text.trim().parse().ok(),
            _ => None,
        };
        id.map(RevisionId::new)
    }

    pub fn view_mode(&self) -> Option<&str> {
        self.settings.get(VIEW_MODE_KEY).and_then(Value::as_str)
    }

    /// Returns `true` if the block label is rendered.
    ///
    /// Stored configuration uses `"0"` or `false` for a hidden label.
    pub fn label_visible(&self) -> bool {
        match self.settings.get("label_display") {
            None | Some(Value::Null) | Some(Value::Bool(false)) => false,
            Some(Value::String(display)) => !display.is_empty() && display != LABEL_HIDDEN,
            Some(_) => true,
        }
    }

    /// Returns the remaining configuration keys.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

/// A resolved, placeable unit of a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    uuid: Uuid,
    region: String,
    configuration: BlockConfiguration,

    #[serde(default)]
    additional: Settings,

    #[serde(default)]
    weight: i64,
}

impl Component {
    /// Creates a new component.
    ///
    /// # Arguments
    ///
    /// * `uuid` - Unique id of the component.
    /// * `region` - Name of the section region the component is placed in.
    /// * `weight` - Order of the component within its region.
    /// * `configuration` - Display configuration of the placed block.
    pub fn new(
        uuid: Uuid,
        region: impl Into<String>,
        weight: i64,
        configuration: BlockConfiguration,
    ) -> Self {
        Self {
            uuid,
            region: region.into(),
            configuration,
            additional: Settings::new(),
            weight,
        }
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn weight(&self) -> i64 {
        self.weight
    }

    pub fn configuration(&self) -> &BlockConfiguration {
        &self.configuration
    }

    pub fn additional(&self) -> &Settings {
        &self.additional
    }

    /// Returns the block type this component embeds, if it embeds an inline block.
    pub fn target_type(&self) -> Option<&str> {
        self.configuration.target_type()
    }

    /// Returns the block revision this component embeds, if any.
    pub fn target_revision_id(&self) -> Option<RevisionId> {
        self.configuration.block_revision_id()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_inline_block_configuration() {
        let config = BlockConfiguration::inline_block("text", RevisionId::new(31));

        assert_eq!(config.id(), "inline_block:text");
        assert_eq!(config.target_type(), Some("text"));
        assert_eq!(config.block_revision_id(), Some(RevisionId::new(31)));
        assert_eq!(config.view_mode(), Some("full"));
        assert!(!config.label_visible());
        assert_eq!(config.settings()["context_mapping"], json!({}));
        assert_eq!(config.settings()["block_serialized"], Value::Null);
    }

    #[test]
    fn test_inline_block_serialized_shape() {
        let component = Component::new(
            Uuid::nil(),
            "content",
            2,
            BlockConfiguration::inline_block("image", RevisionId::new(5)),
        );

        let value = serde_json::to_value(&component).expect("Failed to serialize");
        assert_eq!(value["region"], "content");
        assert_eq!(value["weight"], 2);
        assert_eq!(value["configuration"]["id"], "inline_block:image");
        assert_eq!(value["configuration"]["block_revision_id"], 5);
        assert_eq!(value["configuration"]["provider"], "layout_builder");
        assert_eq!(value["configuration"]["label_display"], "0");
    }

    #[test]
    fn test_unknown_configuration_keys_are_preserved() {
        let value = json!({
            "uuid": "9a5bd5f1-4c1b-4d8c-9d3b-5e5f2a8d1c11",
            "region": "first",
            "configuration": {
                "id": "field_block:node:page:body",
                "label_display": "visible",
                "formatter": { "type": "text_default" }
            },
            "weight": -3
        });

        let component: Component = serde_json::from_value(value.clone()).expect("Failed to parse");
        assert_eq!(component.target_type(), None);
        assert_eq!(component.target_revision_id(), None);
        assert!(component.configuration().label_visible());
        assert_eq!(component.weight(), -3);

        let round_trip = serde_json::to_value(&component).expect("Failed to serialize");
        assert_eq!(round_trip["configuration"], value["configuration"]);
    }

    #[test]
    fn test_stored_nulls_survive_load_and_save() {
        let configuration = json!({
            "id": "inline_block:text",
            "view_mode": null,
            "block_revision_id": null
        });

        let config: BlockConfiguration =
            serde_json::from_value(configuration.clone()).expect("Failed to parse");
        assert_eq!(config.view_mode(), None);
        assert_eq!(config.block_revision_id(), None);

        assert_eq!(serde_json::to_value(&config).unwrap(), configuration);
    }

    #[test]
    fn test_string_revision_id_is_accepted() {
        let configuration = json!({ "id": "inline_block:text", "block_revision_id": "52" });

        let config: BlockConfiguration =
            serde_json::from_value(configuration.clone()).expect("Failed to parse");
        assert_eq!(config.block_revision_id(), Some(RevisionId::new(52)));

        assert_eq!(serde_json::to_value(&config).unwrap(), configuration);
    }
}
