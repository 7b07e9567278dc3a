// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Canonical path rendering and structural dumps
//!
//! Two equivalent textual conventions exist for the same node:
//!
//! - dotted: `adlog.user_info.ad_dsp_action_detail.key:2.list.photo_id`
//! - flattened: `adlog_user_info_ad_dsp_action_detail_key_2_list_photo_id`
//!
//! Keyed collections and label-map leaves carry a runtime key that the node itself cannot
//! represent, so rendering them requires the key as an argument.
//!
//! A node built with a flattened alias renders as that alias in flattened form, and its
//! descendants are prefixed with it.

use serde_json::{json, Map, Value};

use super::node::{NodeId, SchemaNode};
use super::tree::SchemaTree;
use super::RenderError;

/// Separator convention for rendered paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathStyle {
    /// `a.b.key:3`
    Dotted,
    /// `a_b_key_3`
    Flattened,
}

impl PathStyle {
    fn separator(&self) -> &'static str {
        match self {
            PathStyle::Dotted => ".",
            PathStyle::Flattened => "_",
        }
    }

    fn key_marker(&self) -> &'static str {
        match self {
            PathStyle::Dotted => ".key:",
            PathStyle::Flattened => "_key_",
        }
    }
}

impl SchemaTree {
    /// Dotted canonical path of a tree node
    pub fn source_path(&self, id: NodeId, key: Option<i64>) -> Result<String, RenderError> {
        self.render_node(self.node(id), key, PathStyle::Dotted)
    }

    /// Flattened canonical path of a tree node
    pub fn flattened_path(&self, id: NodeId, key: Option<i64>) -> Result<String, RenderError> {
        self.render_node(self.node(id), key, PathStyle::Flattened)
    }

    /// Render any node whose parent chain lives in this tree, including synthesized
    /// attribute entries that are not part of the arena.
    pub fn render_node(
        &self,
        node: &SchemaNode,
        key: Option<i64>,
        style: PathStyle,
    ) -> Result<String, RenderError> {
        let Some(parent_id) = node.parent() else {
            return Ok(node.name().to_string());
        };
        if style == PathStyle::Flattened {
            if let Some(alias) = node.flattened_alias() {
                return Ok(alias.to_string());
            }
        }
        let parent = self.node(parent_id);
        let prefix = self.render_node(parent, key, style)?;

        if node.shape().is_keyed_collection() {
            let key = key.ok_or_else(|| missing_key(node))?;
            return Ok(format!(
                "{}{}{}{}{}",
                prefix,
                style.separator(),
                node.name(),
                style.key_marker(),
                key
            ));
        }

        if node.shape().is_enum_marker() {
            if parent.shape().takes_external_key() {
                let key = key.ok_or_else(|| missing_key(node))?;
                return Ok(format!("{}{}{}", prefix, style.key_marker(), key));
            }
            if parent.shape().is_attribute_bag() {
                return Ok(format!("{}{}{}", prefix, style.key_marker(), node.ordinal()));
            }
        }

        Ok(format!("{}{}{}", prefix, style.separator(), node.name()))
    }

    /// Whether rendering `id` requires an explicit key
    pub fn requires_key(&self, id: NodeId) -> bool {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .any(|current| {
                let node = self.node(current);
                node.shape().is_keyed_collection()
                    || (node.shape().is_enum_marker()
                        && node
                            .parent()
                            .is_some_and(|p| self.node(p).shape().takes_external_key()))
            })
    }

    /// Nested structural dump of the whole tree
    pub fn serialize(&self) -> Value {
        self.serialize_node(self.root_id())
    }

    /// Nested structural dump of one subtree; enum-derived leaves are omitted
    pub fn serialize_node(&self, id: NodeId) -> Value {
        let node = self.node(id);
        if node.shape().is_enum_marker() {
            return Value::Object(Map::new());
        }

        let mut children = Map::new();
        for (name, child) in self.children(id) {
            if self.node(child).shape().is_enum_marker() {
                continue;
            }
            children.insert(name.to_string(), self.serialize_node(child));
        }

        json!({
            "name": node.name(),
            "type_str": node.declared_type(),
            "children": children,
        })
    }
}

fn missing_key(node: &SchemaNode) -> RenderError {
    log::error!(
        "node '{}' ({:?}) must be rendered with an explicit key",
        node.name(),
        node.shape()
    );
    RenderError::MissingKey {
        node: node.name().to_string(),
        shape: node.shape(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::node::NodeShape;
    use crate::schema::tree::TreeArena;

    fn tree() -> SchemaTree {
        let mut arena = TreeArena::new();
        let root = arena.alloc_root(SchemaNode::new("root", "Root", 0));
        let user = arena
            .attach(root, "user_info", SchemaNode::new("user_info", "UserInfo", 0))
            .unwrap();
        arena.attach(user, "id", SchemaNode::new("id", "uint64", 0));

        let bag = arena
            .attach(
                user,
                "attrs",
                SchemaNode::new("attrs", "CommonInfoAttr", 1)
                    .with_shape(NodeShape::AttributeBagList),
            )
            .unwrap();
        let member = arena
            .attach(
                bag,
                "APP_LIST",
                SchemaNode::new("APP_LIST", "Name", 2).with_shape(NodeShape::EnumMarker),
            )
            .unwrap();
        arena.alias(bag, "2", member);

        let history = arena
            .attach(
                root,
                "history",
                SchemaNode::new("history", "SimpleAdDspInfos", 1)
                    .with_shape(NodeShape::KeyedRecordCollection),
            )
            .unwrap();
        arena.attach(history, "amount", SchemaNode::new("amount", "int64", 0));

        let labels = arena
            .attach(
                root,
                "labels",
                SchemaNode::new("labels", "LabelAttr", 2).with_shape(NodeShape::LabelMap),
            )
            .unwrap();
        arena.attach(
            labels,
            "UNKNOW_NAME",
            SchemaNode::new("UNKNOW_NAME", "Name", 0).with_shape(NodeShape::EnumMarker),
        );

        arena.into_tree(root)
    }

    fn path(tree: &SchemaTree, names: &[&str]) -> NodeId {
        names
            .iter()
            .fold(tree.root_id(), |id, name| tree.child(id, name).unwrap())
    }

    #[test]
    fn test_plain_paths() {
        let tree = tree();
        let id = path(&tree, &["user_info", "id"]);
        assert_eq!(tree.source_path(id, None).unwrap(), "root.user_info.id");
        assert_eq!(tree.flattened_path(id, None).unwrap(), "root_user_info_id");
        assert_eq!(tree.source_path(tree.root_id(), None).unwrap(), "root");
    }

    #[test]
    fn test_attribute_entry_uses_enum_value() {
        let tree = tree();
        let id = path(&tree, &["user_info", "attrs", "APP_LIST"]);
        assert_eq!(tree.source_path(id, None).unwrap(), "root.user_info.attrs.key:2");
        assert_eq!(tree.flattened_path(id, None).unwrap(), "root_user_info_attrs_key_2");
    }

    #[test]
    fn test_keyed_collection_requires_key() {
        let tree = tree();
        let id = path(&tree, &["history", "amount"]);
        assert_eq!(tree.source_path(id, Some(7)).unwrap(), "root.history.key:7.amount");
        assert_eq!(tree.flattened_path(id, Some(7)).unwrap(), "root_history_key_7_amount");
        assert!(matches!(
            tree.source_path(id, None),
            Err(RenderError::MissingKey { ref node, .. }) if node == "history"
        ));
        assert!(tree.requires_key(id));
    }

    #[test]
    fn test_label_leaf_uses_external_key() {
        let tree = tree();
        let id = path(&tree, &["labels", "UNKNOW_NAME"]);
        assert_eq!(tree.source_path(id, Some(189)).unwrap(), "root.labels.key:189");
        assert!(tree.source_path(id, None).is_err());

        let labels = path(&tree, &["labels"]);
        assert_eq!(tree.source_path(labels, None).unwrap(), "root.labels");
        assert!(!tree.requires_key(labels));
    }

    #[test]
    fn test_synthesized_entry_renders_through_bag() {
        let tree = tree();
        let bag = path(&tree, &["user_info", "attrs"]);
        let node = SchemaNode::synthesized(bag, 424242);
        assert_eq!(
            tree.render_node(&node, None, PathStyle::Dotted).unwrap(),
            "root.user_info.attrs.key:424242"
        );
    }

    #[test]
    fn test_serialize_skips_enum_leaves() {
        let tree = tree();
        let value = tree.serialize();
        assert_eq!(value["name"], "root");
        assert_eq!(value["type_str"], "Root");

        let attrs = &value["children"]["user_info"]["children"]["attrs"];
        assert_eq!(attrs["type_str"], "CommonInfoAttr");
        assert!(attrs["children"].as_object().unwrap().is_empty());
        assert_eq!(
            value["children"]["history"]["children"]["amount"]["type_str"],
            "int64"
        );
    }
}
