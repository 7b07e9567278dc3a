// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! LogSchema - schema tree and field path resolver for log feature rewriting
//!
//! LogSchema models a large, irregular log message schema as an immutable tree and
//! resolves textual access paths (as extracted from feature code) into typed field
//! references that a rewriting layer can turn into accessor code.
//!
//! # Features
//!
//! - **Reflective Tree Building**: One pass over a schema description builds the whole tree
//! - **Irregular Shapes**: Enum-indexed attribute bags, keyed record collections and label maps
//! - **Path Resolution**: Dotted paths with `key:<int>` markers and trailing `:type` tags
//! - **Canonical Rendering**: Dotted and flattened path forms used as symbol-table keys
//! - **Shared Read-Only Tree**: Built once per process, resolved concurrently without locks
//!
//! # Usage
//!
//! ```rust,ignore
//! use logschema::{PathResolver, ResolverConfig, SchemaTreeBuilder};
//!
//! let tree = SchemaTreeBuilder::default().build_root("adlog", Some(&descriptor))?;
//! let resolver = PathResolver::new(&tree, ResolverConfig::default());
//!
//! let resolved = resolver.resolve("adlog.user_info.common_info_attr.APP_LIST:int64_list");
//! let key = resolved.map(|r| r.source_path());
//! ```

pub mod descriptor;
pub mod registry;
pub mod resolve;
pub mod schema;

pub use descriptor::{
    Cardinality, EnumDescriptor, EnumValue, FieldDescriptor, FieldType, MessageDescriptor,
    ScalarType,
};
pub use registry::{global, init_global, try_global, SchemaRegistry};
pub use resolve::{
    FieldDetail, FieldPath, PathKind, PathResolver, ResolveDiagnostic, ResolveError,
    ResolveResult, ResolvedNode, ResolvedPath, ResolverConfig, SchemaCursor, Segment, TypeTag,
};
pub use schema::{
    NodeId, NodeShape, PathStyle, RenderError, SchemaError, SchemaNode, SchemaResult,
    SchemaTree, SchemaTreeBuilder, ShapeMatcher, ShapeVocabulary,
};

/// LogSchema version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// LogSchema crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
