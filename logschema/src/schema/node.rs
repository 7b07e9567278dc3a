// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
// Schema node definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Index of a node inside its SchemaTree arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Structural shape of a node, decided once at build time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NodeShape {
    /// Ordinary field or message
    #[default]
    Plain,
    /// Leaf derived from an enum declaration: a member, or the bare enum field marker
    EnumMarker,
    /// Repeated attribute bag whose members are enumerated in the schema
    AttributeBagList,
    /// Attribute bag with a single placeholder member; the real id comes at resolution time
    AttributeBagMap,
    /// Map or list of structured records indexed by a runtime key
    KeyedRecordCollection,
    /// Map of label attributes keyed by an externally supplied label id
    LabelMap,
}

impl NodeShape {
    pub fn is_attribute_bag(&self) -> bool {
        matches!(self, NodeShape::AttributeBagList | NodeShape::AttributeBagMap)
    }

    pub fn is_enum_marker(&self) -> bool {
        matches!(self, NodeShape::EnumMarker)
    }

    pub fn is_keyed_collection(&self) -> bool {
        matches!(self, NodeShape::KeyedRecordCollection)
    }

    pub fn is_label_map(&self) -> bool {
        matches!(self, NodeShape::LabelMap)
    }

    /// Shapes whose single placeholder member stands for a key supplied at resolution time
    pub fn takes_external_key(&self) -> bool {
        matches!(self, NodeShape::LabelMap | NodeShape::AttributeBagMap)
    }
}

/// One element of the schema tree
///
/// Nodes are owned by the tree arena; `children` and `parent` hold arena indices. An enum
/// member is registered under both its name and its numeric value, so two child keys may
/// point at the same NodeId.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaNode {
    name: String,
    declared_type: String,
    ordinal: i64,
    shape: NodeShape,
    comment: Option<String>,
    children: BTreeMap<String, NodeId>,
    parent: Option<NodeId>,
    leaf_type_index: BTreeMap<String, String>,
    flattened_alias: Option<String>,
}

impl SchemaNode {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>, ordinal: i64) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            ordinal,
            shape: NodeShape::Plain,
            comment: None,
            children: BTreeMap::new(),
            parent: None,
            leaf_type_index: BTreeMap::new(),
            flattened_alias: None,
        }
    }

    pub fn with_shape(mut self, shape: NodeShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_comment(mut self, comment: Option<String>) -> Self {
        self.comment = comment.filter(|c| !c.is_empty());
        self
    }

    /// Fixed flattened rendering that replaces the parent chain
    pub fn with_flattened_alias(mut self, alias: Option<String>) -> Self {
        self.flattened_alias = alias;
        self
    }

    /// Transient attribute entry for a key the schema does not enumerate.
    /// It points at its bag for rendering but is never inserted into the tree.
    pub fn synthesized(bag: NodeId, value: i64) -> Self {
        let mut node = Self::new(value.to_string(), "int64", value).with_shape(NodeShape::EnumMarker);
        node.parent = Some(bag);
        node
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type as stored, including any `repeated ` qualifier
    pub fn declared_type(&self) -> &str {
        &self.declared_type
    }

    /// Declared type with a trailing `_t` typedef suffix removed
    pub fn type_str(&self) -> &str {
        self.declared_type
            .strip_suffix("_t")
            .unwrap_or(&self.declared_type)
    }

    pub fn ordinal(&self) -> i64 {
        self.ordinal
    }

    pub fn shape(&self) -> NodeShape {
        self.shape
    }

    pub fn flattened_alias(&self) -> Option<&str> {
        self.flattened_alias.as_deref()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_repeated(&self) -> bool {
        self.declared_type.contains("repeated")
    }

    pub fn children(&self) -> &BTreeMap<String, NodeId> {
        &self.children
    }

    pub fn child(&self, name: &str) -> Option<NodeId> {
        self.children.get(name).copied()
    }

    pub fn has_child(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    /// Leaf field name to declared type, only filled on keyed record collections
    pub fn leaf_type_index(&self) -> &BTreeMap<String, String> {
        &self.leaf_type_index
    }

    pub fn leaf_type(&self, field: &str) -> Option<&str> {
        self.leaf_type_index.get(field).map(String::as_str)
    }

    pub fn insert_leaf_type(&mut self, field: impl Into<String>, type_str: impl Into<String>) {
        self.leaf_type_index.insert(field.into(), type_str.into());
    }

    pub(crate) fn set_parent(&mut self, parent: NodeId) {
        debug_assert!(self.parent.is_none(), "parent of '{}' assigned twice", self.name);
        self.parent = Some(parent);
    }

    pub(crate) fn insert_child(&mut self, key: String, child: NodeId) -> bool {
        if self.children.contains_key(&key) {
            return false;
        }
        self.children.insert(key, child);
        true
    }
}
