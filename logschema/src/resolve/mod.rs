// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
// Resolve module - field path parsing and resolution against a built SchemaTree
//
// A PathResolver borrows the immutable tree and owns its configuration. Successful
// resolutions return ResolvedPath values; failures are recorded as diagnostics unless the
// path names a field known to live outside the schema.

pub mod config;
pub mod cursor;
pub mod detail;
pub mod diagnostics;
pub mod error;
pub mod path;
pub mod resolver;
pub mod types;

pub use config::ResolverConfig;
pub use cursor::SchemaCursor;
pub use detail::FieldDetail;
pub use diagnostics::ResolveDiagnostic;
pub use error::{ResolveError, ResolveResult};
pub use path::{count_key_markers, extract_key, split_type_suffix, FieldPath, Segment};
pub use resolver::{PathResolver, ResolvedNode, ResolvedPath};
pub use types::{PathKind, TypeTag};
