//! Concurrent resolution against one shared tree

#[path = "testutils/mod.rs"]
mod testutils;

use logschema::{PathKind, PathResolver, ResolverConfig};
use std::sync::Arc;
use std::thread;
use testutils::sample_tree;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_shared_types_are_send_and_sync() {
    assert_send_sync::<logschema::SchemaTree>();
    assert_send_sync::<PathResolver<'static>>();
    assert_send_sync::<logschema::ResolvedPath<'static>>();
}

#[test]
fn test_batch_preserves_order() {
    let tree = sample_tree();
    let resolver = PathResolver::new(&tree, ResolverConfig::synthesizing());

    let paths: Vec<String> = (0..500)
        .map(|i| match i % 4 {
            0 => format!("root.history.key:{}.amount", i),
            1 => format!("root.attrs.key:{}", i),
            2 => format!("root.labels.key:{}", i),
            _ => format!("root.user_info.unknown_{}", i),
        })
        .collect();
    let refs: Vec<&str> = paths.iter().map(String::as_str).collect();

    let results = resolver.resolve_batch(&refs);
    assert_eq!(results.len(), paths.len());

    for (i, result) in results.iter().enumerate() {
        let i = i as i64;
        match i % 4 {
            0 => {
                let r = result.as_ref().unwrap();
                assert_eq!(r.kind(), PathKind::CollectionLeaf);
                assert_eq!(r.collection_key(), Some(i));
            }
            1 => {
                let r = result.as_ref().unwrap();
                assert_eq!(r.kind(), PathKind::AttributeEntry);
                assert_eq!(r.source_path().unwrap(), format!("root.attrs.key:{}", i));
            }
            2 => assert_eq!(result.as_ref().unwrap().label_key(), Some(i)),
            _ => assert!(result.is_none()),
        }
    }
    assert_eq!(resolver.diagnostic_count(), 125);
}

#[test]
fn test_threads_share_one_tree() {
    let tree = Arc::new(sample_tree());
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let tree = Arc::clone(&tree);
            thread::spawn(move || {
                let resolver = PathResolver::new(&tree, ResolverConfig::strict());
                for i in 0..200 {
                    let key = t * 1_000 + i;
                    let resolved = resolver
                        .resolve(&format!("root.history.key:{}.list.photo_id", key))
                        .unwrap();
                    assert_eq!(resolved.collection_key(), Some(key));
                    assert_eq!(
                        resolved.source_path().unwrap(),
                        format!("root.history.key:{}.list.photo_id", key)
                    );
                }
                resolver.diagnostic_count()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 0);
    }
}

#[test]
fn test_scoped_threads_share_one_resolver() {
    let tree = sample_tree();
    let resolver = PathResolver::new(&tree, ResolverConfig::strict());

    thread::scope(|s| {
        for t in 0..4 {
            let resolver = &resolver;
            s.spawn(move || {
                for i in 0..50 {
                    assert!(resolver.resolve("root.attrs.APP_LIST").is_some());
                    assert!(resolver
                        .resolve(&format!("root.missing_{}_{}", t, i))
                        .is_none());
                }
            });
        }
    });

    assert_eq!(resolver.diagnostic_count(), 200);
}
