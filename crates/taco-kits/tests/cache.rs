use std::sync::Arc;

use taco_kits::cache::{KitCatalogCache, KitSource};
use taco_util::errors::TacoError;
use tempfile::TempDir;

const SMALL_CATALOG: &str = r#"{ "kits": { "only-Kit": { "cordova-cli": "5.1.1" } } }"#;

#[test]
fn repeated_loads_share_one_registry() {
    let cache = KitCatalogCache::new();
    let a = cache.get_or_load(&KitSource::Builtin).unwrap();
    let b = cache.get_or_load(&KitSource::Builtin).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn reset_forces_a_reload() {
    let cache = KitCatalogCache::new();
    let a = cache.get_or_load(&KitSource::Builtin).unwrap();
    cache.reset();
    let b = cache.get_or_load(&KitSource::Builtin).unwrap();
    assert!(!Arc::ptr_eq(&a, &b));
    assert_eq!(a, b);
}

#[test]
fn file_source_is_read_once() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("kits.json");
    std::fs::write(&path, SMALL_CATALOG).unwrap();
    let source = KitSource::File(path.clone());

    let cache = KitCatalogCache::new();
    let first = cache.get_or_load(&source).unwrap();
    assert_eq!(first.len(), 1);

    // Later changes to the file are not observed until reset.
    std::fs::write(&path, "not json").unwrap();
    let second = cache.get_or_load(&source).unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    cache.reset();
    assert!(cache.get_or_load(&source).is_err());
}

#[test]
fn failed_loads_are_not_cached() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("kits.json");
    let source = KitSource::File(path.clone());
    let cache = KitCatalogCache::new();

    let err = cache.get_or_load(&source).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<TacoError>(),
        Some(TacoError::FailedFileRead { .. })
    ));

    std::fs::write(&path, SMALL_CATALOG).unwrap();
    assert_eq!(cache.get_or_load(&source).unwrap().len(), 1);
}

#[test]
fn switching_sources_replaces_the_cache() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("kits.json");
    std::fs::write(&path, SMALL_CATALOG).unwrap();

    let cache = KitCatalogCache::new();
    let builtin = cache.get_or_load(&KitSource::Builtin).unwrap();
    let file = cache.get_or_load(&KitSource::File(path)).unwrap();
    assert_ne!(builtin.len(), file.len());
}

#[test]
fn source_from_override() {
    assert_eq!(KitSource::from_override(None), KitSource::Builtin);
    assert_eq!(
        KitSource::from_override(Some("kits.json".into())),
        KitSource::File("kits.json".into())
    );
}
