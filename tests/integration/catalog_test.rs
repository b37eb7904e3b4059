// Catalog Integration Tests
//
// Name resolution, listing filters, identity stability and failure
// propagation at the LocalCatalog / LocalDb level.

use std::sync::Arc;
use std::sync::atomic::Ordering;

use anyhow::Result;
use local_catalog::{CatalogError, LocalCatalog, PatternMatcher};

#[path = "../common/mod.rs"]
mod common;
use common::FakeMetaProvider;

#[test]
fn test_get_dbs_with_pattern() -> Result<()> {
    let provider = Arc::new(FakeMetaProvider::sample_catalog());
    let catalog = LocalCatalog::new(provider);

    let all = catalog.get_dbs(&PatternMatcher::match_all())?;
    let names: Vec<&str> = all.iter().map(|db| db.name()).collect();
    assert!(names.contains(&"functional"));
    assert!(names.contains(&"functional_seq"));

    let seq_only = catalog.get_dbs(&PatternMatcher::new_hive_pattern("*_seq"))?;
    let names: Vec<&str> = seq_only.iter().map(|db| db.name()).collect();
    assert!(!names.contains(&"functional"));
    assert!(names.contains(&"functional_seq"));
    Ok(())
}

#[test]
fn test_db_identity_is_stable() -> Result<()> {
    let provider = Arc::new(FakeMetaProvider::sample_catalog());
    let catalog = LocalCatalog::new(provider.clone());

    let a = catalog.get_db("functional")?;
    let b = catalog.get_db("functional")?;
    assert!(Arc::ptr_eq(&a, &b));
    // Case-insensitive lookups resolve to the same instance.
    let c = catalog.get_db("FUNCTIONAL")?;
    assert!(Arc::ptr_eq(&a, &c));
    assert_eq!(provider.calls.get_database.load(Ordering::SeqCst), 1);

    // A db returned via listing is the same instance as a direct lookup.
    let listed = catalog.get_dbs(&PatternMatcher::new_hive_pattern("functional"))?;
    assert_eq!(listed.len(), 1);
    assert!(Arc::ptr_eq(&a, &listed[0]));
    Ok(())
}

#[test]
fn test_cold_db_listing_lists_names_once() -> Result<()> {
    let provider = Arc::new(FakeMetaProvider::sample_catalog());
    let catalog = LocalCatalog::new(provider.clone());

    let all = catalog.get_dbs(&PatternMatcher::match_all())?;
    assert_eq!(all.len(), 2);
    // One name round trip for the listing plus one metadata fetch per match.
    assert_eq!(provider.calls.list_database_names.load(Ordering::SeqCst), 1);
    assert_eq!(provider.calls.get_database.load(Ordering::SeqCst), 2);

    // A warm listing fetches no metadata at all.
    catalog.get_dbs(&PatternMatcher::match_all())?;
    assert_eq!(provider.calls.list_database_names.load(Ordering::SeqCst), 2);
    assert_eq!(provider.calls.get_database.load(Ordering::SeqCst), 2);
    Ok(())
}

#[test]
fn test_db_names_fold_ascii_case_only() -> Result<()> {
    let mut provider = FakeMetaProvider::new();
    provider.add_db("münchen_sales");
    let provider = Arc::new(provider);
    let catalog = LocalCatalog::new(provider.clone());

    let a = catalog.get_db("münchen_sales")?;
    let b = catalog.get_db("münchen_sales")?;
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(provider.calls.get_database.load(Ordering::SeqCst), 1);

    // ASCII case differences fold; non-ASCII characters must match exactly,
    // matching the metastore's identifier model.
    let c = catalog.get_db("MüNCHEN_SALES")?;
    assert!(Arc::ptr_eq(&a, &c));
    let err = catalog.get_db("MÜNCHEN_SALES").unwrap_err();
    assert!(matches!(err, CatalogError::DatabaseNotFound(_)));
    Ok(())
}

#[test]
fn test_get_table_and_identity() -> Result<()> {
    let provider = Arc::new(FakeMetaProvider::sample_catalog());
    let catalog = LocalCatalog::new(provider.clone());

    let db = catalog.get_db("functional")?;
    let t = catalog.get_table("functional", "alltypes")?;
    assert!(Arc::ptr_eq(&t, &db.get_table("alltypes")?));
    assert!(Arc::ptr_eq(&t, &db.get_table("ALLTYPES")?));
    assert_eq!(provider.calls.get_table.load(Ordering::SeqCst), 1);

    assert_eq!(t.name(), "alltypes");
    assert_eq!(t.db_name(), "functional");
    assert_eq!(t.full_name(), "functional.alltypes");
    let parent = t.db().expect("owning db should be alive");
    assert!(Arc::ptr_eq(&db, &parent));
    Ok(())
}

#[test]
fn test_list_tables_does_not_load_them() -> Result<()> {
    let provider = Arc::new(FakeMetaProvider::sample_catalog());
    let catalog = LocalCatalog::new(provider.clone());

    let names = catalog.get_table_names("functional", &PatternMatcher::match_all())?;
    assert!(names.contains(&"alltypes".to_string()));
    assert!(names.contains(&"alltypesagg".to_string()));

    let filtered = catalog.get_table_names(
        "functional",
        &PatternMatcher::new_hive_pattern("alltypes"),
    )?;
    assert_eq!(filtered, vec!["alltypes".to_string()]);

    // Browsing names must never force a table load.
    assert_eq!(provider.calls.get_table.load(Ordering::SeqCst), 0);
    Ok(())
}

#[test]
fn test_not_found_conditions() {
    let provider = Arc::new(FakeMetaProvider::sample_catalog());
    let catalog = LocalCatalog::new(provider);

    let err = catalog.get_db("no_such_db").unwrap_err();
    assert!(matches!(err, CatalogError::DatabaseNotFound(_)));
    assert!(err.is_not_found());

    let err = catalog.get_table("functional", "no_such_table").unwrap_err();
    assert!(matches!(err, CatalogError::TableNotFound(_, _)));
    assert!(err.is_not_found());

    // A missing database propagates from the table lookup path too.
    let err = catalog.get_table("no_such_db", "alltypes").unwrap_err();
    assert!(matches!(err, CatalogError::DatabaseNotFound(_)));
}

#[test]
fn test_provider_unavailable_is_distinct_from_not_found() {
    let provider = Arc::new(FakeMetaProvider::sample_catalog());
    let catalog = LocalCatalog::new(provider.clone());

    provider.set_unreachable(true);
    let err = catalog.get_db("functional").unwrap_err();
    assert!(matches!(err, CatalogError::ProviderUnavailable(_)));
    assert!(!err.is_not_found());
}

#[test]
fn test_failed_load_is_not_cached() -> Result<()> {
    let provider = Arc::new(FakeMetaProvider::sample_catalog());
    let catalog = LocalCatalog::new(provider.clone());

    provider.set_unreachable(true);
    assert!(catalog.get_db("functional").is_err());

    // Once the metastore is reachable again the same lookup succeeds; the
    // failure was not stored as a cached result.
    provider.set_unreachable(false);
    let db = catalog.get_db("functional")?;
    assert_eq!(db.name(), "functional");
    Ok(())
}
