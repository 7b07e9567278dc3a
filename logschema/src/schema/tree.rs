// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Arena-backed schema tree
//!
//! Every node is owned by the `nodes` vector. Tree edges are `NodeId`s, so the parent
//! back-reference is a plain index and the arena is the only owner. The tree is assembled by
//! [`TreeArena`] during construction and frozen into a [`SchemaTree`] afterwards.

use super::node::{NodeId, SchemaNode};

/// Immutable schema tree, shared read-only across resolver threads
#[derive(Debug, Clone)]
pub struct SchemaTree {
    nodes: Vec<SchemaNode>,
    root: NodeId,
}

impl SchemaTree {
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn root(&self) -> &SchemaNode {
        self.node(self.root)
    }

    /// Look up a node by id.
    ///
    /// Ids are only minted by this tree's arena, so an id from another tree is a caller bug.
    pub fn node(&self, id: NodeId) -> &SchemaNode {
        &self.nodes[id.index()]
    }

    pub fn get(&self, id: NodeId) -> Option<&SchemaNode> {
        self.nodes.get(id.index())
    }

    /// Number of distinct nodes (aliased enum keys count once)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent()
    }

    pub fn child(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.node(id).child(name)
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (&str, NodeId)> + '_ {
        self.node(id)
            .children()
            .iter()
            .map(|(name, child)| (name.as_str(), *child))
    }

    /// Ancestors of `id`, nearest first, excluding `id` itself
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |current| self.parent(*current))
    }

    /// Whether the node or one of its ancestors is a repeated field
    pub fn is_from_list(&self, id: NodeId) -> bool {
        self.node(id).is_repeated() || self.ancestors(id).any(|a| self.node(a).is_repeated())
    }

    /// All node ids in allocation order (parents before children)
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len() as u32).map(NodeId)
    }
}

/// Mutable arena used while the builder assembles the tree
#[derive(Debug, Default)]
pub(crate) struct TreeArena {
    nodes: Vec<SchemaNode>,
}

impl TreeArena {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn alloc_root(&mut self, node: SchemaNode) -> NodeId {
        self.push(node)
    }

    /// Allocate `node` as a child of `parent` under `key`.
    ///
    /// Returns None, without allocating, when `parent` already has a child under `key`;
    /// the first registration of a name wins.
    pub(crate) fn attach(&mut self, parent: NodeId, key: &str, mut node: SchemaNode) -> Option<NodeId> {
        if self.nodes[parent.index()].has_child(key) {
            log::debug!(
                "Duplicate child key '{}' under '{}', keeping the first",
                key,
                self.nodes[parent.index()].name()
            );
            return None;
        }

        node.set_parent(parent);
        let id = self.push(node);
        self.nodes[parent.index()].insert_child(key.to_string(), id);
        Some(id)
    }

    /// Register an existing child under an additional key; the node is not copied
    pub(crate) fn alias(&mut self, parent: NodeId, key: &str, child: NodeId) -> bool {
        debug_assert_eq!(self.nodes[child.index()].parent(), Some(parent));
        self.nodes[parent.index()].insert_child(key.to_string(), child)
    }

    pub(crate) fn node(&self, id: NodeId) -> &SchemaNode {
        &self.nodes[id.index()]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut SchemaNode {
        &mut self.nodes[id.index()]
    }

    pub(crate) fn into_tree(self, root: NodeId) -> SchemaTree {
        SchemaTree {
            nodes: self.nodes,
            root,
        }
    }

    fn push(&mut self, node: SchemaNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }
}
