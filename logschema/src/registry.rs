// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Process-wide schema registry
//!
//! The schema tree is built once per process and shared read-only afterwards. The registry
//! pairs that tree with the resolver configuration chosen at startup.
//!
//! # When to Use
//!
//! Use the global registry when:
//! - Many rewriting passes in one process need the same schema
//! - The schema description is only available through a loader at startup
//!
//! Tests and tools that need several schemas side by side should build a
//! [`SchemaRegistry`] directly instead.
//!
//! # Example
//!
//! ```rust,ignore
//! use logschema::{init_global, global, ResolverConfig, ShapeVocabulary};
//!
//! init_global("adlog", || load_adlog_descriptor(), ShapeVocabulary::default(),
//!     ResolverConfig::synthesizing());
//!
//! let resolver = global().resolver();
//! let resolved = resolver.resolve("adlog.user_info.id");
//! ```

use once_cell::sync::OnceCell;

use crate::descriptor::MessageDescriptor;
use crate::resolve::{PathResolver, ResolverConfig};
use crate::schema::{SchemaResult, SchemaTree, SchemaTreeBuilder, ShapeVocabulary};

/// Process-wide registry, set at most once
static REGISTRY: OnceCell<SchemaRegistry> = OnceCell::new();

/// A built tree together with the resolver policy used against it
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    tree: SchemaTree,
    config: ResolverConfig,
}

impl SchemaRegistry {
    /// Build the tree for `root_name` from `descriptor`
    pub fn build(
        root_name: &str,
        descriptor: Option<&MessageDescriptor>,
        vocabulary: ShapeVocabulary,
        config: ResolverConfig,
    ) -> SchemaResult<Self> {
        let tree = SchemaTreeBuilder::new(vocabulary).build_root(root_name, descriptor)?;
        Ok(Self { tree, config })
    }

    pub fn from_tree(tree: SchemaTree, config: ResolverConfig) -> Self {
        Self { tree, config }
    }

    pub fn tree(&self) -> &SchemaTree {
        &self.tree
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// A resolver over the registered tree with the registered policy
    ///
    /// Each resolver keeps its own diagnostics.
    pub fn resolver(&self) -> PathResolver<'_> {
        PathResolver::new(&self.tree, self.config.clone())
    }
}

/// Initialise the global registry.
///
/// Only the first call builds anything; later calls return the registry that is already in
/// place and never invoke `loader`. A missing root descriptor leaves the process unable to
/// rewrite anything, so it panics here rather than failing later resolutions.
pub fn init_global<F>(
    root_name: &str,
    loader: F,
    vocabulary: ShapeVocabulary,
    config: ResolverConfig,
) -> &'static SchemaRegistry
where
    F: FnOnce() -> Option<MessageDescriptor>,
{
    REGISTRY.get_or_init(|| {
        let descriptor = loader();
        match SchemaRegistry::build(root_name, descriptor.as_ref(), vocabulary, config) {
            Ok(registry) => registry,
            Err(e) => {
                log::error!("build schema tree '{}' failed: {}", root_name, e);
                panic!("schema registry initialisation failed: {}", e);
            }
        }
    })
}

/// The global registry, if [`init_global`] has run
pub fn try_global() -> Option<&'static SchemaRegistry> {
    REGISTRY.get()
}

/// The global registry
///
/// # Panics
///
/// Panics if [`init_global`] has not been called.
pub fn global() -> &'static SchemaRegistry {
    match REGISTRY.get() {
        Some(registry) => registry,
        None => panic!("schema registry used before init_global"),
    }
}
