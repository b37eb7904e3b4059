// Database Module
//
// Lazily wraps one database's metadata and mediates table lookups within
// it. A LocalDb is constructed once per name by its owning catalog and
// returned by identity on every subsequent lookup.

use std::sync::Arc;

use log::debug;

use crate::cache::LazyMap;
use crate::catalog::table::LocalTable;
use crate::error::CatalogResult;
use crate::pattern::PatternMatcher;
use crate::provider::{DbMetadata, MetadataProvider};

/// A cached database. Table wrappers are created on demand and reused for
/// the lifetime of this object.
pub struct LocalDb {
    name: String,
    location: Option<String>,
    comment: Option<String>,
    provider: Arc<dyn MetadataProvider>,
    /// Tables keyed by lowercased name
    tables: LazyMap<String, LocalTable>,
}

impl std::fmt::Debug for LocalDb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalDb")
            .field("name", &self.name)
            .field("location", &self.location)
            .field("comment", &self.comment)
            .finish_non_exhaustive()
    }
}

impl LocalDb {
    pub(crate) fn new(meta: DbMetadata, provider: Arc<dyn MetadataProvider>) -> Self {
        LocalDb {
            name: meta.name,
            location: meta.location,
            comment: meta.comment,
            provider,
            tables: LazyMap::new(),
        }
    }

    /// Get the database name, in provider-canonical casing
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Look up a table by name, case-insensitively. On a cache miss the
    /// full table metadata is fetched from the provider and wrapped in the
    /// variant matching its declared storage kind; concurrent lookups for
    /// the same name construct at most one instance.
    pub fn get_table(self: &Arc<Self>, name: &str) -> CatalogResult<Arc<LocalTable>> {
        let key = name.to_ascii_lowercase();
        self.tables.get_or_try_init(&key, || {
            debug!("loading table metadata for {}.{}", self.name, name);
            let meta = self.provider.get_table(&self.name, name)?;
            LocalTable::new(
                meta,
                Arc::downgrade(self),
                self.name.clone(),
                Arc::clone(&self.provider),
            )
        })
    }

    /// List table names matching the given pattern. Only the raw name
    /// listing is fetched; unmatched tables are never loaded.
    pub fn get_table_names(&self, matcher: &PatternMatcher) -> CatalogResult<Vec<String>> {
        let names = self.provider.list_table_names(&self.name)?;
        Ok(names.into_iter().filter(|n| matcher.matches(n)).collect())
    }
}
