// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Segment-by-segment path resolution
//!
//! The walk starts at a node whose name must equal the first segment, then consumes one
//! field segment at a time. The shape of the child reached decides how the rest of the path
//! is read:
//!
//! | child shape             | remainder            | result                                   |
//! |-------------------------|----------------------|------------------------------------------|
//! | Plain                   | anything             | keep walking                             |
//! | EnumMarker              | ignored              | the leaf, kind `Enum`                    |
//! | attribute bag           | empty                | the bag, kind `CollectionList`           |
//! |                         | `key:<int>`          | member by number, or synthesized entry   |
//! |                         |                      | (map flavour: placeholder, key kept aside)|
//! |                         | member name          | member by name                           |
//! | keyed record collection | empty                | the collection, kind `CollectionList`    |
//! |                         | `key:<int>[.rest]`   | walk `rest` inside the record            |
//! | label map               | empty                | the map, kind `LabelMapWhole`            |
//! |                         | `key:<int>`          | the placeholder member, key kept aside   |
//!
//! A bag or label-map `key:<int>` may be followed by a single `key` or `value` accessor.

use rayon::prelude::*;
use std::borrow::Cow;
use std::ptr;

use super::config::ResolverConfig;
use super::diagnostics::{DiagnosticLog, ResolveDiagnostic};
use super::error::{ResolveError, ResolveResult};
use super::path::{extract_key, split_type_suffix, FieldPath, Segment};
use super::types::{PathKind, TypeTag};
use crate::schema::{NodeId, NodeShape, PathStyle, RenderError, SchemaNode, SchemaTree};

/// Node a resolution ended on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedNode {
    /// Borrowed from the shared tree
    Tree(NodeId),
    /// Fabricated for an unindexed attribute key; owned by the result, never in the tree
    Synthesized(SchemaNode),
}

/// Result of one resolution call
#[derive(Debug, Clone)]
pub struct ResolvedPath<'t> {
    tree: &'t SchemaTree,
    node: ResolvedNode,
    kind: PathKind,
    type_override: Option<TypeTag>,
    collection_key: Option<i64>,
    label_key: Option<i64>,
}

impl<'t> ResolvedPath<'t> {
    fn in_tree(tree: &'t SchemaTree, id: NodeId, kind: PathKind) -> Self {
        Self {
            tree,
            node: ResolvedNode::Tree(id),
            kind,
            type_override: None,
            collection_key: None,
            label_key: None,
        }
    }

    fn synthesized(tree: &'t SchemaTree, node: SchemaNode) -> Self {
        Self {
            tree,
            node: ResolvedNode::Synthesized(node),
            kind: PathKind::AttributeEntry,
            type_override: None,
            collection_key: None,
            label_key: None,
        }
    }

    pub fn tree(&self) -> &'t SchemaTree {
        self.tree
    }

    pub fn node(&self) -> &SchemaNode {
        match &self.node {
            ResolvedNode::Tree(id) => self.tree.node(*id),
            ResolvedNode::Synthesized(node) => node,
        }
    }

    pub fn resolved_node(&self) -> &ResolvedNode {
        &self.node
    }

    /// Arena id, or None for a synthesized node
    pub fn node_id(&self) -> Option<NodeId> {
        match self.node {
            ResolvedNode::Tree(id) => Some(id),
            ResolvedNode::Synthesized(_) => None,
        }
    }

    pub fn is_synthesized(&self) -> bool {
        matches!(self.node, ResolvedNode::Synthesized(_))
    }

    pub fn kind(&self) -> PathKind {
        self.kind
    }

    pub fn type_override(&self) -> Option<TypeTag> {
        self.type_override
    }

    pub fn collection_key(&self) -> Option<i64> {
        self.collection_key
    }

    /// Key supplied for a label map or map-flavour attribute bag
    pub fn label_key(&self) -> Option<i64> {
        self.label_key
    }

    /// The runtime key needed to render this result, if any
    pub fn key(&self) -> Option<i64> {
        self.collection_key.or(self.label_key)
    }

    /// Explicit `:type` tag if one was given, else the node's declared type
    pub fn declared_type(&self) -> &str {
        match self.type_override {
            Some(tag) => tag.as_str(),
            None => self.node().type_str(),
        }
    }

    pub fn source_path(&self) -> Result<String, RenderError> {
        self.tree.render_node(self.node(), self.key(), PathStyle::Dotted)
    }

    pub fn flattened_path(&self) -> Result<String, RenderError> {
        self.tree.render_node(self.node(), self.key(), PathStyle::Flattened)
    }

    /// Give up the resolution metadata and keep only the node
    pub fn into_node(self) -> Cow<'t, SchemaNode> {
        match self.node {
            ResolvedNode::Tree(id) => Cow::Borrowed(self.tree.node(id)),
            ResolvedNode::Synthesized(node) => Cow::Owned(node),
        }
    }

    fn with_kind(mut self, kind: PathKind) -> Self {
        self.kind = kind;
        self
    }
}

impl PartialEq for ResolvedPath<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree)
            && self.node == other.node
            && self.kind == other.kind
            && self.type_override == other.type_override
            && self.collection_key == other.collection_key
            && self.label_key == other.label_key
    }
}

impl Eq for ResolvedPath<'_> {}

/// Resolves access paths against a built tree
///
/// The tree is borrowed read-only and the configuration is captured at construction, so one
/// resolver can serve any number of threads.
#[derive(Debug)]
pub struct PathResolver<'t> {
    tree: &'t SchemaTree,
    config: ResolverConfig,
    diagnostics: DiagnosticLog,
}

impl<'t> PathResolver<'t> {
    pub fn new(tree: &'t SchemaTree, config: ResolverConfig) -> Self {
        let diagnostics = DiagnosticLog::with_capacity(config.max_diagnostics);
        Self {
            tree,
            config,
            diagnostics,
        }
    }

    pub fn tree(&self) -> &'t SchemaTree {
        self.tree
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve from the tree root; failures are logged and recorded, then dropped
    pub fn resolve(&self, path: &str) -> Option<ResolvedPath<'t>> {
        self.resolve_from(self.tree.root_id(), path)
    }

    pub fn try_resolve(&self, path: &str) -> ResolveResult<ResolvedPath<'t>> {
        self.try_resolve_from(self.tree.root_id(), path)
    }

    /// Resolve relative to `start`; the path's first segment must name `start` itself
    pub fn resolve_from(&self, start: NodeId, path: &str) -> Option<ResolvedPath<'t>> {
        match self.try_resolve_from(start, path) {
            Ok(resolved) => Some(resolved),
            Err(e) => {
                self.diagnostics.record(path, &e);
                None
            }
        }
    }

    /// Like [`resolve_from`](Self::resolve_from) but returns the failure and records nothing
    pub fn try_resolve_from(&self, start: NodeId, path: &str) -> ResolveResult<ResolvedPath<'t>> {
        FieldPath::parse(path)
            .and_then(|field_path| self.walk(start, &field_path))
            .map_err(|e| {
                let (body, _) = split_type_suffix(path);
                if self.config.is_opaque(body) {
                    ResolveError::Opaque {
                        path: path.to_string(),
                    }
                } else {
                    e
                }
            })
    }

    /// Resolve many paths in parallel; output order follows input order
    pub fn resolve_batch(&self, paths: &[&str]) -> Vec<Option<ResolvedPath<'t>>> {
        paths.par_iter().map(|path| self.resolve(path)).collect()
    }

    pub fn diagnostics(&self) -> Vec<ResolveDiagnostic> {
        self.diagnostics.snapshot()
    }

    pub fn take_diagnostics(&self) -> Vec<ResolveDiagnostic> {
        self.diagnostics.take()
    }

    pub fn diagnostic_count(&self) -> usize {
        self.diagnostics.len()
    }

    /// Diagnostics evicted because the log was full, since the last drain
    pub fn dropped_diagnostics(&self) -> usize {
        self.diagnostics.dropped()
    }

    fn walk(&self, start: NodeId, path: &FieldPath) -> ResolveResult<ResolvedPath<'t>> {
        let start_name = self.tree.node(start).name();
        let segments = path.segments();

        match segments.first() {
            Some(Segment::Field(name)) if name == start_name => {}
            first => {
                return Err(ResolveError::RootMismatch {
                    expected: start_name.to_string(),
                    found: first.map(|s| s.to_string()).unwrap_or_default(),
                })
            }
        }

        let mut resolved = self.descend(start, &segments[1..])?;
        resolved.type_override = path.type_override();
        Ok(resolved)
    }

    fn descend(&self, current: NodeId, rest: &[Segment]) -> ResolveResult<ResolvedPath<'t>> {
        let Some((next, remainder)) = rest.split_first() else {
            return Ok(ResolvedPath::in_tree(self.tree, current, PathKind::Normal));
        };

        let field = match next {
            Segment::Field(name) => name,
            Segment::Key(key) => {
                return Err(ResolveError::UnexpectedKey {
                    parent: self.tree.node(current).name().to_string(),
                    key: *key,
                })
            }
        };

        let child = self
            .tree
            .child(current, field)
            .ok_or_else(|| ResolveError::UnknownField {
                parent: self.tree.node(current).name().to_string(),
                field: field.clone(),
            })?;

        match self.tree.node(child).shape() {
            NodeShape::EnumMarker => Ok(ResolvedPath::in_tree(self.tree, child, PathKind::Enum)),
            NodeShape::AttributeBagList | NodeShape::AttributeBagMap => {
                self.resolve_attribute(child, remainder)
            }
            NodeShape::KeyedRecordCollection => self.resolve_collection(child, remainder),
            NodeShape::LabelMap => self.resolve_label(child, remainder),
            NodeShape::Plain => self.descend(child, remainder),
        }
    }

    fn resolve_attribute(&self, bag: NodeId, remainder: &[Segment]) -> ResolveResult<ResolvedPath<'t>> {
        let bag_name = || self.tree.node(bag).name().to_string();

        if remainder.is_empty() {
            return Ok(ResolvedPath::in_tree(self.tree, bag, PathKind::CollectionList));
        }

        if let Some(key) = key_remainder(remainder) {
            if self.tree.node(bag).shape().takes_external_key() {
                return self.resolve_placeholder(bag, key, PathKind::AttributeEntry);
            }
            return match self.tree.child(bag, &key.to_string()) {
                Some(member) => Ok(ResolvedPath::in_tree(self.tree, member, PathKind::AttributeEntry)),
                None if self.config.synthesize_on_miss => {
                    log::debug!("synthesize attribute entry key:{} under '{}'", key, bag_name());
                    Ok(ResolvedPath::synthesized(
                        self.tree,
                        SchemaNode::synthesized(bag, key),
                    ))
                }
                None => Err(ResolveError::MissingAttributeKey {
                    bag: bag_name(),
                    key,
                }),
            };
        }

        match remainder {
            [Segment::Field(member)]
                if is_member_name(member) || self.config.is_irregular_member(member) =>
            {
                self.tree
                    .child(bag, member)
                    .map(|id| ResolvedPath::in_tree(self.tree, id, PathKind::AttributeEntry))
                    .ok_or_else(|| ResolveError::UnknownMember {
                        bag: bag_name(),
                        member: member.clone(),
                    })
            }
            _ => Err(ResolveError::MalformedAttributeRemainder {
                bag: bag_name(),
                remainder: join(remainder),
            }),
        }
    }

    fn resolve_collection(
        &self,
        collection: NodeId,
        remainder: &[Segment],
    ) -> ResolveResult<ResolvedPath<'t>> {
        let (key, rest) = match remainder {
            [] => {
                return Ok(ResolvedPath::in_tree(
                    self.tree,
                    collection,
                    PathKind::CollectionList,
                ))
            }
            [Segment::Key(key), rest @ ..] => (*key, rest),
            _ => {
                return Err(ResolveError::MalformedCollectionRemainder {
                    collection: self.tree.node(collection).name().to_string(),
                    remainder: join(remainder),
                })
            }
        };

        let mut resolved = self.descend(collection, rest)?.with_kind(PathKind::CollectionLeaf);
        resolved.collection_key = Some(key);
        Ok(resolved)
    }

    fn resolve_label(&self, map: NodeId, remainder: &[Segment]) -> ResolveResult<ResolvedPath<'t>> {
        if remainder.is_empty() {
            return Ok(ResolvedPath::in_tree(self.tree, map, PathKind::LabelMapWhole));
        }

        match key_remainder(remainder) {
            Some(key) => self.resolve_placeholder(map, key, PathKind::LabelMapLeaf),
            None => Err(ResolveError::MalformedLabelRemainder {
                map: self.tree.node(map).name().to_string(),
                remainder: join(remainder),
            }),
        }
    }

    /// The schema enum of a map-flavour shape only carries the placeholder member 0; the
    /// supplied key is kept aside on the result.
    fn resolve_placeholder(
        &self,
        parent: NodeId,
        key: i64,
        kind: PathKind,
    ) -> ResolveResult<ResolvedPath<'t>> {
        let placeholder =
            self.tree
                .child(parent, "0")
                .ok_or_else(|| ResolveError::LabelIndexMissing {
                    map: self.tree.node(parent).name().to_string(),
                })?;
        let mut resolved = ResolvedPath::in_tree(self.tree, placeholder, kind);
        resolved.label_key = Some(key);
        Ok(resolved)
    }
}

/// Key of a remainder made of `key:<int>` and at most one `key` / `value` accessor
fn key_remainder(remainder: &[Segment]) -> Option<i64> {
    if !matches!(remainder.first(), Some(Segment::Key(_))) {
        return None;
    }
    let text = join(remainder);
    match extract_key(&text) {
        Some((key, "")) => Some(key),
        _ => None,
    }
}

/// Upper-case letters, digits and underscores only
fn is_member_name(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

fn join(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{EnumDescriptor, FieldDescriptor, FieldType, MessageDescriptor, ScalarType};
    use crate::schema::SchemaTreeBuilder;

    fn tree() -> SchemaTree {
        let attr = MessageDescriptor::new("CommonInfoAttr")
            .with_enum(
                EnumDescriptor::new("Name")
                    .with_value("UNKNOW_NAME", 0)
                    .with_value("FOO", 1),
            )
            .with_field(FieldDescriptor::scalar("name_value", 1, ScalarType::Int32))
            .with_field(FieldDescriptor::scalar("int_value", 2, ScalarType::Int64));
        let label = MessageDescriptor::new("LabelAttr")
            .with_enum(EnumDescriptor::new("Name").with_value("UNKNOW_NAME", 0))
            .with_field(FieldDescriptor::scalar("name_value", 1, ScalarType::Int64))
            .with_field(FieldDescriptor::scalar("int_value", 2, ScalarType::Int64))
            .shared();
        let infos = MessageDescriptor::new("SimpleLiveInfos")
            .with_field(FieldDescriptor::scalar("amount", 1, ScalarType::Int64));

        let root = MessageDescriptor::new("Root")
            .with_field(FieldDescriptor::repeated_message("attrs", 1, attr.shared()))
            .with_field(FieldDescriptor::map(
                "labels",
                2,
                ScalarType::Uint64,
                FieldType::Message {
                    message: label.clone(),
                },
            ))
            .with_field(FieldDescriptor::map(
                "history",
                3,
                ScalarType::Int64,
                FieldType::Message {
                    message: infos.shared(),
                },
            ))
            .with_field(FieldDescriptor::repeated_message("bag", 4, label));
        SchemaTreeBuilder::default().build_root("root", Some(&root)).unwrap()
    }

    #[test]
    fn test_bag_remainders() {
        let tree = tree();
        let resolver = PathResolver::new(&tree, ResolverConfig::strict());

        let whole = resolver.try_resolve("root.attrs").unwrap();
        assert_eq!(whole.kind(), PathKind::CollectionList);

        let by_name = resolver.try_resolve("root.attrs.FOO").unwrap();
        let by_key = resolver.try_resolve("root.attrs.key:1").unwrap();
        assert_eq!(by_name, by_key);
        assert_eq!(by_key.kind(), PathKind::AttributeEntry);

        assert!(matches!(
            resolver.try_resolve("root.attrs.Foo"),
            Err(ResolveError::MalformedAttributeRemainder { .. })
        ));
        assert!(matches!(
            resolver.try_resolve("root.attrs.BAR"),
            Err(ResolveError::UnknownMember { .. })
        ));
        assert_eq!(resolver.try_resolve("root.attrs.key:1.value").unwrap(), by_key);
        assert_eq!(resolver.try_resolve("root.attrs.key:1.key").unwrap(), by_key);
        assert!(matches!(
            resolver.try_resolve("root.attrs.key:1.extra"),
            Err(ResolveError::MalformedAttributeRemainder { .. })
        ));
        assert!(matches!(
            resolver.try_resolve("root.attrs.key:1.value.key"),
            Err(ResolveError::MalformedAttributeRemainder { .. })
        ));
    }

    #[test]
    fn test_missing_attribute_key_depends_on_policy() {
        let tree = tree();
        let strict = PathResolver::new(&tree, ResolverConfig::strict());
        assert_eq!(
            strict.try_resolve("root.attrs.key:99"),
            Err(ResolveError::MissingAttributeKey {
                bag: "attrs".to_string(),
                key: 99
            })
        );

        let lenient = PathResolver::new(&tree, ResolverConfig::synthesizing());
        let resolved = lenient.try_resolve("root.attrs.key:99").unwrap();
        assert!(resolved.is_synthesized());
        assert_eq!(resolved.node().ordinal(), 99);
        assert_eq!(resolved.source_path().unwrap(), "root.attrs.key:99");
    }

    #[test]
    fn test_collection_key_is_threaded() {
        let tree = tree();
        let resolver = PathResolver::new(&tree, ResolverConfig::strict());

        let leaf = resolver.try_resolve("root.history.key:7.amount").unwrap();
        assert_eq!(leaf.kind(), PathKind::CollectionLeaf);
        assert_eq!(leaf.collection_key(), Some(7));
        assert_eq!(leaf.node().name(), "amount");

        let bare = resolver.try_resolve("root.history.key:7").unwrap();
        assert_eq!(bare.kind(), PathKind::CollectionLeaf);
        assert_eq!(bare.node().name(), "history");
        assert_eq!(bare.source_path().unwrap(), "root.history.key:7");

        assert!(matches!(
            resolver.try_resolve("root.history.amount"),
            Err(ResolveError::MalformedCollectionRemainder { .. })
        ));
    }

    #[test]
    fn test_label_key_is_external() {
        let tree = tree();
        let resolver = PathResolver::new(&tree, ResolverConfig::strict());

        let leaf = resolver.try_resolve("root.labels.key:42").unwrap();
        assert_eq!(leaf.kind(), PathKind::LabelMapLeaf);
        assert_eq!(leaf.label_key(), Some(42));
        assert_eq!(leaf.node().ordinal(), 0);
        assert_eq!(leaf.source_path().unwrap(), "root.labels.key:42");

        let whole = resolver.try_resolve("root.labels").unwrap();
        assert_eq!(whole.kind(), PathKind::LabelMapWhole);

        for suffix in ["key", "value"] {
            let resolved = resolver
                .try_resolve(&format!("root.labels.key:42.{}", suffix))
                .unwrap();
            assert_eq!(resolved, leaf);
        }
        assert!(matches!(
            resolver.try_resolve("root.labels.key:42.amount"),
            Err(ResolveError::MalformedLabelRemainder { .. })
        ));
    }

    #[test]
    fn test_map_flavor_bag_threads_supplied_key() {
        let tree = tree();
        let resolver = PathResolver::new(&tree, ResolverConfig::strict());

        let entry = resolver.try_resolve("root.bag.key:42").unwrap();
        assert_eq!(entry.kind(), PathKind::AttributeEntry);
        assert!(!entry.is_synthesized());
        assert_eq!(entry.node().ordinal(), 0);
        assert_eq!(entry.label_key(), Some(42));
        assert_eq!(entry.source_path().unwrap(), "root.bag.key:42");
        assert_eq!(entry.flattened_path().unwrap(), "root_bag_key_42");
        assert_eq!(resolver.try_resolve("root.bag.key:42.value").unwrap(), entry);

        let whole = resolver.try_resolve("root.bag").unwrap();
        assert_eq!(whole.kind(), PathKind::CollectionList);

        let by_name = resolver.try_resolve("root.bag.UNKNOW_NAME").unwrap();
        assert_eq!(by_name.label_key(), None);
        assert!(by_name.source_path().is_err());
    }

    #[test]
    fn test_failures_record_one_diagnostic_each() {
        let tree = tree();
        let resolver = PathResolver::new(&tree, ResolverConfig::strict());

        assert!(resolver.resolve("root.nope").is_none());
        assert!(resolver.resolve("other.attrs").is_none());
        assert!(resolver.resolve("root.is_train").is_none());
        assert_eq!(resolver.diagnostic_count(), 2);

        let diagnostics = resolver.take_diagnostics();
        assert_eq!(diagnostics[0].path, "root.nope");
        assert!(matches!(
            diagnostics[1].error,
            ResolveError::RootMismatch { ref expected, .. } if expected == "root"
        ));
        assert_eq!(resolver.diagnostic_count(), 0);
    }

    #[test]
    fn test_diagnostics_are_bounded() {
        let tree = tree();
        let resolver = PathResolver::new(&tree, ResolverConfig::strict().with_max_diagnostics(3));

        for i in 0..5 {
            assert!(resolver.resolve(&format!("root.missing_{}", i)).is_none());
        }
        assert_eq!(resolver.diagnostic_count(), 3);
        assert_eq!(resolver.dropped_diagnostics(), 2);
        assert_eq!(resolver.diagnostics()[0].path, "root.missing_2");
    }

    #[test]
    fn test_type_override() {
        let tree = tree();
        let resolver = PathResolver::new(&tree, ResolverConfig::strict());
        let resolved = resolver.try_resolve("root.attrs.key:1:int64_list").unwrap();
        assert_eq!(resolved.type_override(), Some(TypeTag::Int64List));
        assert_eq!(resolved.declared_type(), "int64_list");
    }

    #[test]
    fn test_member_name_charset() {
        assert!(is_member_name("APP_LIST_2"));
        assert!(!is_member_name("App_List"));
        assert!(!is_member_name(""));
    }
}
