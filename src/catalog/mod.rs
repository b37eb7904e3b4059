//! Catalog Module
//!
//! The local, lazily populated view of cluster metadata used during query
//! planning. A LocalCatalog owns one MetadataProvider and resolves database
//! and table names to cached wrapper objects, loading metadata on demand.
//! Within one catalog instance, repeated lookups return the same instance,
//! so object identity stays valid across a planning session.

pub mod db;
pub mod partition;
pub mod table;

pub use self::db::LocalDb;
pub use self::partition::LocalFsPartition;
pub use self::table::{FsTable, LocalTable, TableKind, TableStatsResult};

use std::sync::Arc;

use log::debug;

use crate::cache::LazyMap;
use crate::error::{CatalogError, CatalogResult};
use crate::pattern::PatternMatcher;
use crate::provider::MetadataProvider;

/// The entry point of the local metadata cache. One instance per
/// query-compilation session; never a process-wide singleton, so identity
/// and cache contents cannot leak across sessions.
pub struct LocalCatalog {
    provider: Arc<dyn MetadataProvider>,
    /// Databases keyed by lowercased name
    dbs: LazyMap<String, LocalDb>,
}

impl LocalCatalog {
    /// Create a catalog backed by the given provider
    pub fn new(provider: Arc<dyn MetadataProvider>) -> Self {
        LocalCatalog {
            provider,
            dbs: LazyMap::new(),
        }
    }

    /// Get the provider this catalog loads through
    pub fn provider(&self) -> &Arc<dyn MetadataProvider> {
        &self.provider
    }

    /// Look up a database by name, case-insensitively. On a cache miss the
    /// provider's name listing is consulted first so that unknown names fail
    /// NotFound without a metadata fetch; a hit returns the same instance on
    /// every subsequent call.
    pub fn get_db(&self, name: &str) -> CatalogResult<Arc<LocalDb>> {
        if let Some(db) = self.dbs.get(&name.to_ascii_lowercase()) {
            return Ok(db);
        }
        let names = self.provider.list_database_names()?;
        let canonical = names
            .iter()
            .find(|n| n.eq_ignore_ascii_case(name))
            .ok_or_else(|| CatalogError::DatabaseNotFound(name.to_string()))?;
        self.load_db(canonical)
    }

    /// List databases whose names match the given pattern, in
    /// provider-returned order. Matched databases are created (and cached)
    /// as needed; the listing already establishes existence, so a cold
    /// listing costs one name round trip plus one fetch per new match.
    pub fn get_dbs(&self, matcher: &PatternMatcher) -> CatalogResult<Vec<Arc<LocalDb>>> {
        let mut dbs = Vec::new();
        for name in self.provider.list_database_names()? {
            if matcher.matches(&name) {
                dbs.push(self.load_db(&name)?);
            }
        }
        Ok(dbs)
    }

    /// Get or create the wrapper for a name known to exist on the provider.
    fn load_db(&self, canonical: &str) -> CatalogResult<Arc<LocalDb>> {
        self.dbs
            .get_or_try_init(&canonical.to_ascii_lowercase(), || {
                debug!("loading database metadata for '{}'", canonical);
                let meta = self.provider.get_database(canonical)?;
                Ok(LocalDb::new(meta, Arc::clone(&self.provider)))
            })
    }

    /// Look up a table, resolving the database first. Absence of either
    /// level surfaces as the corresponding NotFound error.
    pub fn get_table(&self, db_name: &str, table_name: &str) -> CatalogResult<Arc<LocalTable>> {
        let db = self.get_db(db_name)?;
        db.get_table(table_name)
    }

    /// List table names in a database matching the given pattern
    pub fn get_table_names(
        &self,
        db_name: &str,
        matcher: &PatternMatcher,
    ) -> CatalogResult<Vec<String>> {
        let db = self.get_db(db_name)?;
        db.get_table_names(matcher)
    }
}
