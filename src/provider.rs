// Metadata Provider Module
//
// The sole channel between the local catalog and the remote metastore. The
// catalog never talks to the wire itself; implementations of
// MetadataProvider own the RPC mechanics, retry policy, and the decoding of
// wire-format details such as the NULL partition key sentinel.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::error::CatalogResult;
use crate::fs::FileDescriptor;
use crate::value::LiteralValue;

/// Stable identifier of a partition within its table
pub type PartitionId = i64;

/// The string the metastore conventionally uses to represent a NULL
/// partition key value in a partition path. Provider implementations decode
/// it into `LiteralValue::Null`; it never appears in the in-memory model.
pub const DEFAULT_NULL_PARTITION_KEY_VALUE: &str = "__HIVE_DEFAULT_PARTITION__";

/// How a table's data is stored, as declared by the metastore. Selects the
/// table variant the catalog constructs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageKind {
    /// Data lives in files on a distributed filesystem, possibly partitioned
    Filesystem,
    /// A logical table with no file placement of its own
    View,
}

/// Database metadata as returned by the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbMetadata {
    pub name: String,
    pub location: Option<String>,
    pub comment: Option<String>,
}

/// Full table metadata as returned by the provider. For filesystem tables
/// this includes the compact partition key listing: every partition's id and
/// key values, available before any per-partition detail is fetched. The
/// NULL-partition index is built from this listing at table-load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableMetadata {
    pub name: String,
    pub storage_kind: StorageKind,
    /// Columns in declared order; partitioning columns come first
    pub columns: Vec<Column>,
    /// Number of leading columns that are partitioning columns
    pub num_partition_cols: usize,
    /// Row count statistic, -1 if unknown
    pub num_rows: i64,
    /// The wire sentinel this table's metastore uses for NULL key values
    pub null_partition_key_value: String,
    pub location: Option<String>,
    /// Compact (partition id -> key values) listing for filesystem tables;
    /// empty for other storage kinds
    pub partition_keys: BTreeMap<PartitionId, Vec<LiteralValue>>,
}

/// Per-partition detail fetched on demand
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartitionMetadata {
    pub id: PartitionId,
    /// Key values aligned with the table's partitioning columns
    pub values: Vec<LiteralValue>,
    pub location: String,
    /// Row count statistic, -1 if unknown
    pub row_count: i64,
    pub num_files: u64,
    pub size_bytes: u64,
}

/// The pluggable loader the catalog calls on every cache miss.
///
/// Calls are synchronous and may block on network I/O. "Does not exist"
/// conditions surface as the NotFound error family; infrastructure trouble
/// surfaces as `ProviderUnavailable`. Implementations own any retry or
/// timeout policy; the catalog never retries internally.
pub trait MetadataProvider: Send + Sync {
    /// List the names of all databases, in metastore order.
    fn list_database_names(&self) -> CatalogResult<Vec<String>>;

    /// Fetch one database's metadata. Fails NotFound for unknown names.
    fn get_database(&self, name: &str) -> CatalogResult<DbMetadata>;

    /// List the names of all tables in a database, in metastore order.
    fn list_table_names(&self, db: &str) -> CatalogResult<Vec<String>>;

    /// Fetch one table's full metadata, including the compact partition key
    /// listing for filesystem tables. Fails NotFound for unknown names.
    fn get_table(&self, db: &str, table: &str) -> CatalogResult<TableMetadata>;

    /// Fetch detail for a batch of partitions in one round trip. Ids absent
    /// from the result were unknown to the metastore.
    fn get_partitions_by_ids(
        &self,
        db: &str,
        table: &str,
        ids: &[PartitionId],
    ) -> CatalogResult<HashMap<PartitionId, PartitionMetadata>>;

    /// Fetch the file descriptors of one partition.
    fn get_file_descriptors(
        &self,
        db: &str,
        table: &str,
        id: PartitionId,
    ) -> CatalogResult<Vec<FileDescriptor>>;
}
