// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Schema tree construction
//!
//! One recursive pass over a [`MessageDescriptor`] produces the whole tree. Every field
//! falls into one of these cases:
//!
//! 1. Enum field: each member becomes one leaf registered under its name and under its
//!    numeric value, plus a marker leaf under the field's own name.
//! 2. Repeated scalar, or map with a scalar/enum value: a single leaf.
//! 3. Message, repeated message, or map with a message value: recurse into the message type,
//!    unless the type is an attribute bag, in which case only its member enums are indexed.
//!    A map's key is not modelled; it becomes a runtime index during resolution.
//! 4. Plain scalar: a single leaf.
//! 5. Anything else (groups): logged and skipped.

use crate::descriptor::{EnumDescriptor, FieldDescriptor, FieldType, MessageDescriptor};
use crate::schema::node::{NodeId, NodeShape, SchemaNode};
use crate::schema::shape::{BagFlavor, MessageShape, ShapeMatcher};
use crate::schema::tree::{SchemaTree, TreeArena};
use crate::schema::vocabulary::ShapeVocabulary;
use crate::schema::{SchemaError, SchemaResult};

/// How a message-typed field holds its message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Singular,
    Repeated,
    Map,
}

/// Builds a [`SchemaTree`] from a schema description
#[derive(Debug, Clone)]
pub struct SchemaTreeBuilder {
    vocabulary: ShapeVocabulary,
    matcher: ShapeMatcher,
}

impl SchemaTreeBuilder {
    pub fn new(vocabulary: ShapeVocabulary) -> Self {
        let matcher = ShapeMatcher::from_vocabulary(&vocabulary);
        Self {
            vocabulary,
            matcher,
        }
    }

    pub fn vocabulary(&self) -> &ShapeVocabulary {
        &self.vocabulary
    }

    pub fn matcher(&self) -> &ShapeMatcher {
        &self.matcher
    }

    /// Build the tree rooted at a node named `root_name`.
    ///
    /// A missing root descriptor is an error the caller is expected to treat as fatal;
    /// problems with individual fields only skip that field.
    pub fn build_root(
        &self,
        root_name: &str,
        root: Option<&MessageDescriptor>,
    ) -> SchemaResult<SchemaTree> {
        let descriptor =
            root.ok_or_else(|| SchemaError::MissingRootDescriptor(root_name.to_string()))?;

        log::info!("Start building schema tree '{}' from '{}'", root_name, descriptor.name);

        let mut arena = TreeArena::new();
        let root_id = match self.matcher.classify(descriptor) {
            MessageShape::Structural => {
                let node = SchemaNode::new(root_name, descriptor.name.as_str(), 0);
                let id = arena.alloc_root(node);
                self.expand_fields(&mut arena, id, descriptor, false);
                id
            }
            shape => {
                return Err(SchemaError::InvalidDescriptor(format!(
                    "root message '{}' has special shape {:?}",
                    descriptor.name, shape
                )))
            }
        };

        let tree = arena.into_tree(root_id);
        log::debug!("Schema tree '{}' built with {} nodes", root_name, tree.len());
        log::info!("Build schema tree '{}' success", root_name);
        Ok(tree)
    }

    /// Build a node for a message-typed field and attach it under `parent`
    #[allow(clippy::too_many_arguments)]
    fn build_message(
        &self,
        arena: &mut TreeArena,
        parent: NodeId,
        field: &FieldDescriptor,
        descriptor: &MessageDescriptor,
        ordinal: i64,
        repeated: bool,
        container: Container,
    ) {
        match self.matcher.classify(descriptor) {
            MessageShape::AttributeBag(flavor) => {
                self.build_attribute_bag(arena, parent, field, descriptor, ordinal, flavor, container);
            }
            shape => {
                let declared_type = if repeated {
                    format!("repeated {}", descriptor.name)
                } else {
                    descriptor.name.clone()
                };
                let node_shape = if shape == MessageShape::KeyedRecords {
                    NodeShape::KeyedRecordCollection
                } else {
                    NodeShape::Plain
                };
                let node = self
                    .field_node(field, declared_type, ordinal)
                    .with_shape(node_shape);

                if let Some(id) = arena.attach(parent, &field.name, node) {
                    self.expand_fields(arena, id, descriptor, repeated);
                    if node_shape == NodeShape::KeyedRecordCollection {
                        self.index_leaf_types(arena, id);
                    }
                }
            }
        }
    }

    fn expand_fields(
        &self,
        arena: &mut TreeArena,
        id: NodeId,
        descriptor: &MessageDescriptor,
        repeated: bool,
    ) {
        for (index, field) in descriptor.fields.iter().enumerate() {
            self.build_field(arena, id, field, index as i64, repeated);
        }
    }

    fn build_field(
        &self,
        arena: &mut TreeArena,
        parent: NodeId,
        field: &FieldDescriptor,
        ordinal: i64,
        repeated: bool,
    ) {
        if self.vocabulary.is_passthrough(&field.name) {
            self.add_leaf(arena, parent, field, field.type_name().to_string(), ordinal);
            return;
        }

        match &field.field_type {
            FieldType::Enum { enum_type } => {
                self.add_enum(arena, parent, enum_type, field.type_name(), Some(&field.name));
            }
            FieldType::Map { key, value } => match value.as_ref() {
                FieldType::Message { message } => {
                    self.build_message(arena, parent, field, message, ordinal, repeated, Container::Map);
                }
                value if value.is_basic() => {
                    let value_type = match value {
                        FieldType::Enum { enum_type } => enum_type.name.as_str(),
                        other => other.type_name(),
                    };
                    let declared_type = format!("map<{}, {}>", key.type_name(), value_type);
                    self.add_leaf(arena, parent, field, declared_type, ordinal);
                }
                other => {
                    log::info!(
                        "ignore, map value type: {}, field_name: {}",
                        other.type_name(),
                        field.name
                    );
                }
            },
            FieldType::Message { message } if field.is_repeated() => {
                self.build_message(arena, parent, field, message, ordinal, true, Container::Repeated);
            }
            FieldType::Message { message } => {
                self.build_message(arena, parent, field, message, ordinal, repeated, Container::Singular);
            }
            FieldType::Scalar { scalar } if field.is_repeated() => {
                let declared_type = format!("repeated {}", scalar.type_name());
                self.add_leaf(arena, parent, field, declared_type, ordinal);
            }
            FieldType::Scalar { scalar } => {
                self.add_leaf(arena, parent, field, scalar.type_name().to_string(), ordinal);
            }
            FieldType::Group => {
                log::info!("ignore, field type: {}, field_name: {}", field.type_name(), field.name);
            }
        }
    }

    fn field_node(&self, field: &FieldDescriptor, declared_type: String, ordinal: i64) -> SchemaNode {
        SchemaNode::new(field.name.as_str(), declared_type, ordinal)
            .with_comment(field.comment.clone())
            .with_flattened_alias(self.vocabulary.flattened_alias(&field.name).map(str::to_string))
    }

    fn add_leaf(
        &self,
        arena: &mut TreeArena,
        parent: NodeId,
        field: &FieldDescriptor,
        declared_type: String,
        ordinal: i64,
    ) {
        let node = self.field_node(field, declared_type, ordinal);
        arena.attach(parent, &field.name, node);
    }

    /// Register every member of `enum_type` under `parent`, by name and by number, sharing
    /// one node; then a marker leaf under `marker` for bare references to the field itself.
    fn add_enum(
        &self,
        arena: &mut TreeArena,
        parent: NodeId,
        enum_type: &EnumDescriptor,
        type_str: &str,
        marker: Option<&str>,
    ) {
        for value in &enum_type.values {
            let node = SchemaNode::new(value.name.as_str(), type_str, value.number)
                .with_shape(NodeShape::EnumMarker)
                .with_comment(value.comment.clone());
            if let Some(id) = arena.attach(parent, &value.name, node) {
                arena.alias(parent, &value.number.to_string(), id);
            }
        }

        if let Some(field_name) = marker.filter(|m| !m.is_empty()) {
            let node = SchemaNode::new(field_name, "int64", 0).with_shape(NodeShape::EnumMarker);
            arena.attach(parent, field_name, node);
        }
    }

    /// Attribute bags keep only their member index; value fields are dropped since the
    /// caller states the value type in the path.
    #[allow(clippy::too_many_arguments)]
    fn build_attribute_bag(
        &self,
        arena: &mut TreeArena,
        parent: NodeId,
        field: &FieldDescriptor,
        descriptor: &MessageDescriptor,
        ordinal: i64,
        flavor: BagFlavor,
        container: Container,
    ) {
        let shape = match (flavor, container) {
            (BagFlavor::List, _) => NodeShape::AttributeBagList,
            (BagFlavor::Map, Container::Map) => NodeShape::LabelMap,
            (BagFlavor::Map, _) => NodeShape::AttributeBagMap,
        };

        let node = self
            .field_node(field, descriptor.name.clone(), ordinal)
            .with_shape(shape);

        let Some(id) = arena.attach(parent, &field.name, node) else {
            return;
        };

        for enum_type in descriptor
            .enums
            .iter()
            .filter(|e| self.vocabulary.is_member_enum(&e.name))
        {
            self.add_enum(arena, id, enum_type, &enum_type.name, Some(&field.name));
        }
    }

    /// Fill the leaf type index from the record list field, or from the collection's own
    /// children when the record has no list field.
    fn index_leaf_types(&self, arena: &mut TreeArena, id: NodeId) {
        let source = arena
            .node(id)
            .child(&self.vocabulary.record_list_field)
            .unwrap_or(id);

        let entries: Vec<(String, String)> = arena
            .node(source)
            .children()
            .values()
            .map(|child| {
                let child = arena.node(*child);
                (child.name().to_string(), child.type_str().to_string())
            })
            .collect();

        let collection = arena.node_mut(id);
        for (name, type_str) in entries {
            if name.is_empty() {
                log::info!("field name is empty! type_str: {}", type_str);
                continue;
            }
            collection.insert_leaf_type(name, type_str);
        }
    }
}

impl Default for SchemaTreeBuilder {
    fn default() -> Self {
        Self::new(ShapeVocabulary::default())
    }
}
