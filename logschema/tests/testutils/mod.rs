//! Test utilities for LogSchema integration tests
//!
//! - sample_schema: a small log schema covering every node shape
//! - init_logging: env_logger in test mode, safe to call from every test

#![allow(dead_code)]

pub mod sample_schema;

use logschema::{PathResolver, ResolverConfig, SchemaTree, SchemaTreeBuilder};

/// Route `log` output through the test harness
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build the sample tree with the default vocabulary
pub fn sample_tree() -> SchemaTree {
    init_logging();
    SchemaTreeBuilder::default()
        .build_root(sample_schema::ROOT_NAME, Some(&sample_schema::root_descriptor()))
        .expect("Failed to build sample schema tree")
}

/// Resolver with synthesis disabled
pub fn strict_resolver(tree: &SchemaTree) -> PathResolver<'_> {
    PathResolver::new(tree, ResolverConfig::strict())
}

/// Resolver with synthesis enabled
pub fn synthesizing_resolver(tree: &SchemaTree) -> PathResolver<'_> {
    PathResolver::new(tree, ResolverConfig::synthesizing())
}
