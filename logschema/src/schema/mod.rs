// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
// Schema module - immutable schema tree built from a log message description
//
// The tree is built once by SchemaTreeBuilder and never mutated afterwards. Nodes live in a
// single arena owned by SchemaTree; children and parents are referenced by NodeId.

pub mod builder;
pub mod node;
pub mod render;
pub mod shape;
pub mod tree;
pub mod vocabulary;

pub use builder::SchemaTreeBuilder;
pub use node::{NodeId, NodeShape, SchemaNode};
pub use render::PathStyle;
pub use shape::{BagFlavor, FieldKind, FieldRequirement, MessageShape, ShapeMatcher, ShapeRule};
pub use tree::SchemaTree;
pub use vocabulary::ShapeVocabulary;

// Schema module error type
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Root descriptor unavailable for '{0}'")]
    MissingRootDescriptor(String),

    #[error("Invalid schema description: {0}")]
    InvalidDescriptor(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type SchemaResult<T> = Result<T, SchemaError>;

/// Rendering failures; these indicate a caller bug, not a schema mismatch
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Node '{node}' ({shape:?}) can only be rendered with an explicit key")]
    MissingKey { node: String, shape: NodeShape },
}
