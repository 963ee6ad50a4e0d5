//! Nested layout collections and their flattening.
//!
//! Process steps that produce several sections at once (default layouts,
//! paragraph sections) leave the destination layout as an arbitrarily nested
//! structure of sections, sub-collections and empty placeholders. A layout
//! field only stores a flat list of sections, so the structure is flattened
//! before it is saved:
//!
//! ```text
//! [A, [B, [C, D]], null, E]  =>  [A, B, C, D, E]
//! ```
//!
//! Only [`LayoutNode::Empty`] placeholders are dropped. A leaf always
//! survives, including a section without any components.

use std::{ops::Deref, vec};

use log::trace;
use serde::{Deserialize, Serialize};

use crate::section::Section;

/// A raw, possibly nested layout value.
///
/// In JSON form `null` is [`LayoutNode::Empty`], an array is a
/// [`LayoutNode::Branch`] and anything else is a [`LayoutNode::Leaf`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LayoutNode<T = Section> {
    /// A null placeholder.
    Empty,
    /// A nested collection.
    Branch(Vec<LayoutNode<T>>),
    /// A single value, usually a [`Section`].
    Leaf(T),
}

impl<T> LayoutNode<T> {
    /// Creates a leaf node.
    pub fn leaf(value: T) -> Self {
        Self::Leaf(value)
    }

    /// Creates a branch node from child nodes.
    pub fn branch(children: impl IntoIterator<Item = LayoutNode<T>>) -> Self {
        Self::Branch(children.into_iter().collect())
    }

    /// Creates a branch holding one leaf per value.
    pub fn leaves(values: impl IntoIterator<Item = T>) -> Self {
        Self::Branch(values.into_iter().map(Self::Leaf).collect())
    }

    /// Returns `true` for an empty placeholder.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Flattens this node. See [`flatten`].
    pub fn flatten(self) -> FlatLayout<T> {
        flatten(self)
    }
}

impl<T> Default for LayoutNode<T> {
    fn default() -> Self {
        Self::Empty
    }
}

/// A flat, ordered sequence of layout values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlatLayout<T = Section>(Vec<T>);

impl<T> FlatLayout<T> {
    /// Returns the flattened values.
    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T> Default for FlatLayout<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> Deref for FlatLayout<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> IntoIterator for FlatLayout<T> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<T> From<FlatLayout<T>> for LayoutNode<T> {
    fn from(layout: FlatLayout<T>) -> Self {
        LayoutNode::leaves(layout)
    }
}

/// Flattens a nested layout collection into a single ordered sequence.
///
/// Values are emitted in pre-order, left to right. Empty placeholders are
/// skipped before descending, so gaps never produce entries. The traversal
/// keeps its own stack of child iterators, so nesting depth is bounded only
/// by memory, not by the call stack.
pub fn flatten<T>(collection: LayoutNode<T>) -> FlatLayout<T> {
    let mut flat = Vec::new();
    let mut stack: Vec<vec::IntoIter<LayoutNode<T>>> = Vec::new();

    match collection {
        LayoutNode::Empty => {}
        LayoutNode::Leaf(value) => flat.push(value),
        LayoutNode::Branch(children) => stack.push(children.into_iter()),
    }

    while let Some(level) = stack.last_mut() {
        match level.next() {
            None => {
                stack.pop();
            }
            Some(LayoutNode::Empty) => {}
            Some(LayoutNode::Leaf(value)) => flat.push(value),
            Some(LayoutNode::Branch(children)) => stack.push(children.into_iter()),
        }
    }

    trace!(values = flat.len(); "Flattened layout collection");
    FlatLayout(flat)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn leaf(value: u32) -> LayoutNode<u32> {
        LayoutNode::leaf(value)
    }

    #[test]
    fn test_flatten_mixed_nesting() {
        // [A, [B, [C, D]], null, E]
        let collection = LayoutNode::branch([
            leaf(1),
            LayoutNode::branch([leaf(2), LayoutNode::branch([leaf(3), leaf(4)])]),
            LayoutNode::Empty,
            leaf(5),
        ]);

        assert_eq!(flatten(collection).into_vec(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_flatten_drops_placeholders_at_every_depth() {
        let collection = LayoutNode::branch([
            LayoutNode::Empty,
            LayoutNode::branch([LayoutNode::Empty, leaf(1), LayoutNode::branch([])]),
            LayoutNode::branch([LayoutNode::branch([LayoutNode::Empty])]),
            leaf(2),
        ]);

        assert_eq!(flatten(collection).into_vec(), vec![1, 2]);
    }

    #[test]
    fn test_flatten_top_level_values() {
        assert!(flatten(LayoutNode::<u32>::Empty).is_empty());
        assert_eq!(flatten(leaf(9)).into_vec(), vec![9]);
    }

    #[test]
    fn test_empty_section_survives_flattening() {
        let collection = LayoutNode::branch([
            LayoutNode::Empty,
            LayoutNode::leaf(Section::default()),
            LayoutNode::branch([LayoutNode::leaf(Section::default())]),
        ]);

        let flat = flatten(collection);
        assert_eq!(flat.len(), 2);
        assert!(flat.iter().all(Section::is_empty));
    }

    #[test]
    fn test_flatten_deep_nesting() {
        let mut node = leaf(7);
        for _ in 0..200_000 {
            node = LayoutNode::Branch(vec![node]);
        }

        assert_eq!(flatten(node).into_vec(), vec![7]);
    }

    #[test]
    fn test_json_form() {
        let value = json!([
            { "layout_id": "layout_onecol" },
            [null, { "layout_id": "layout_twocol_section" }],
            null
        ]);

        let collection: LayoutNode = serde_json::from_value(value).expect("Failed to parse layout");
        let layout_ids: Vec<String> = flatten(collection)
            .into_iter()
            .map(|section| section.layout_id().to_string())
            .collect();
        assert_eq!(layout_ids, vec!["layout_onecol", "layout_twocol_section"]);
    }
}
