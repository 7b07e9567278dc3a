// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Node-anchored lookups
//!
//! A [`SchemaCursor`] pins a resolver to one tree node and offers the single-field
//! conveniences a rewriting layer needs: the node, its comment, its type, or the attribute
//! enum name for a path below that node.

use serde_json::Value;
use std::borrow::Cow;

use super::resolver::{PathResolver, ResolvedPath};
use crate::schema::{NodeId, RenderError, SchemaNode};

#[derive(Debug, Clone, Copy)]
pub struct SchemaCursor<'r, 't> {
    resolver: &'r PathResolver<'t>,
    at: NodeId,
}

impl<'t> PathResolver<'t> {
    /// Cursor at the tree root
    pub fn root(&self) -> SchemaCursor<'_, 't> {
        self.at(self.tree().root_id())
    }

    pub fn at(&self, id: NodeId) -> SchemaCursor<'_, 't> {
        SchemaCursor { resolver: self, at: id }
    }
}

impl<'r, 't> SchemaCursor<'r, 't> {
    pub fn id(&self) -> NodeId {
        self.at
    }

    pub fn node(&self) -> &'t SchemaNode {
        self.resolver.tree().node(self.at)
    }

    /// Node for `path`; a synthesized attribute entry comes back owned
    pub fn find_descendant(&self, path: &str) -> Option<Cow<'t, SchemaNode>> {
        self.find_descendant_detail(path).map(ResolvedPath::into_node)
    }

    pub fn find_descendant_detail(&self, path: &str) -> Option<ResolvedPath<'t>> {
        self.resolver.resolve_from(self.at, path)
    }

    /// Field comment; enum-derived leaves answer `"<member>,<comment>"`
    pub fn find_comment(&self, path: &str) -> Option<String> {
        let node = self.find_descendant(path)?;
        if node.shape().is_enum_marker() {
            Some(format!("{},{}", node.name(), node.comment().unwrap_or_default()))
        } else {
            node.comment().map(str::to_string)
        }
    }

    /// Declared type without any `_t` suffix; the `:type` tag does not apply here
    pub fn find_declared_type(&self, path: &str) -> Option<String> {
        self.find_descendant(path).map(|node| node.type_str().to_string())
    }

    /// `"<BagTypeName>::<MEMBER>"` for an attribute entry, e.g. `CommonInfoAttr::APP_LIST`
    pub fn find_attribute_enum_name(&self, path: &str) -> Option<String> {
        let tree = self.resolver.tree();
        let found = self
            .find_descendant(path)
            .and_then(|node| node.parent().map(|parent| (node, parent)));

        match found {
            Some((node, parent)) => Some(format!("{}::{}", tree.node(parent).type_str(), node.name())),
            None => {
                log::info!("cannot find attribute enum name, path: {}", path);
                None
            }
        }
    }

    pub fn source_path(&self, key: Option<i64>) -> Result<String, RenderError> {
        self.resolver.tree().source_path(self.at, key)
    }

    pub fn flattened_path(&self, key: Option<i64>) -> Result<String, RenderError> {
        self.resolver.tree().flattened_path(self.at, key)
    }

    pub fn serialize(&self) -> Value {
        self.resolver.tree().serialize_node(self.at)
    }
}
