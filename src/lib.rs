// Local Catalog
//
// A local, lazily populated cache of cluster metadata (databases, tables,
// partitions, file placement) for a distributed SQL query engine's planner.
// Metadata is fetched on demand through a pluggable MetadataProvider,
// cached by stable identity, and exposed through read-only,
// pattern-filterable lookups that are safe to call from concurrent
// query-compilation threads.

mod cache;
pub mod catalog;
pub mod column;
pub mod error;
pub mod fs;
pub mod pattern;
pub mod provider;
pub mod value;

// Re-export key items for convenient access
pub use catalog::{FsTable, LocalCatalog, LocalDb, LocalFsPartition, LocalTable, TableKind,
                  TableStatsResult};
pub use column::{Column, ColumnType};
pub use error::{CatalogError, CatalogResult};
pub use fs::{FileBlock, FileDescriptor};
pub use pattern::PatternMatcher;
pub use provider::{DbMetadata, MetadataProvider, PartitionId, PartitionMetadata, StorageKind,
                   TableMetadata, DEFAULT_NULL_PARTITION_KEY_VALUE};
pub use value::LiteralValue;
