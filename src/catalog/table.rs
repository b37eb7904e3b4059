// Table Module
//
// Lazily loaded table metadata. A table is constructed once per (db, name)
// by its owning database and returned by identity thereafter. Filesystem
// tables additionally carry the partitioning model: the compact partition
// key listing, a per-column index of NULL-valued partitions built at load
// time, and a lazy cache of fully loaded partitions.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Weak};

use log::debug;

use crate::cache::LazyMap;
use crate::catalog::db::LocalDb;
use crate::catalog::partition::LocalFsPartition;
use crate::column::Column;
use crate::error::{CatalogError, CatalogResult};
use crate::provider::{MetadataProvider, PartitionId, StorageKind, TableMetadata};
use crate::value::LiteralValue;

/// Maximum number of partition ids fetched per provider call when loading
/// partitions in bulk.
pub const PARTITION_FETCH_BATCH_SIZE: usize = 128;

/// The storage-kind-specific half of a table
pub enum TableKind {
    /// Filesystem-backed table with partitioning metadata
    Fs(FsTable),
    /// Logical table with no file placement
    View,
}

/// A cached table. Columns are in declared order with partitioning columns
/// occupying the leading positions.
pub struct LocalTable {
    db: Weak<LocalDb>,
    db_name: String,
    name: String,
    columns: Vec<Column>,
    /// Lowercased column name to ordinal lookup
    column_map: HashMap<String, usize>,
    num_rows: i64,
    kind: TableKind,
}

impl std::fmt::Debug for LocalTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalTable")
            .field("db_name", &self.db_name)
            .field("name", &self.name)
            .field("columns", &self.columns)
            .field("num_rows", &self.num_rows)
            .field(
                "kind",
                match &self.kind {
                    TableKind::Fs(_) => &"Fs",
                    TableKind::View => &"View",
                },
            )
            .finish_non_exhaustive()
    }
}

impl LocalTable {
    pub(crate) fn new(
        meta: TableMetadata,
        db: Weak<LocalDb>,
        db_name: String,
        provider: Arc<dyn MetadataProvider>,
    ) -> CatalogResult<Self> {
        let mut column_map = HashMap::new();
        for (i, col) in meta.columns.iter().enumerate() {
            if col.position() != i {
                return Err(CatalogError::InconsistentMetadata(format!(
                    "column '{}' of {}.{} declares position {} but appears at ordinal {}",
                    col.name(),
                    db_name,
                    meta.name,
                    col.position(),
                    i
                )));
            }
            column_map.insert(col.name().to_ascii_lowercase(), i);
        }
        let kind = match meta.storage_kind {
            StorageKind::Filesystem => TableKind::Fs(FsTable::new(
                &meta,
                db_name.clone(),
                meta.name.clone(),
                provider,
            )?),
            StorageKind::View => TableKind::View,
        };
        Ok(LocalTable {
            db,
            db_name,
            name: meta.name,
            columns: meta.columns,
            column_map,
            num_rows: meta.num_rows,
            kind,
        })
    }

    /// Get the table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the owning database's name
    pub fn db_name(&self) -> &str {
        &self.db_name
    }

    /// Get the fully qualified "db.table" name
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.db_name, self.name)
    }

    /// Get the owning database, if it is still alive
    pub fn db(&self) -> Option<Arc<LocalDb>> {
        self.db.upgrade()
    }

    /// Columns in declared order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Get a column by name, case-insensitively
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.column_map
            .get(&name.to_ascii_lowercase())
            .map(|&idx| &self.columns[idx])
    }

    /// Row count estimate from table statistics, -1 if unknown. Never
    /// recomputed from partitions.
    pub fn num_rows(&self) -> i64 {
        self.num_rows
    }

    pub fn kind(&self) -> &TableKind {
        &self.kind
    }

    /// Get the filesystem half of this table, if it is filesystem-backed
    pub fn as_fs(&self) -> Option<&FsTable> {
        match &self.kind {
            TableKind::Fs(fs) => Some(fs),
            TableKind::View => None,
        }
    }

    /// Build the tabular stats summary: one row per partition plus one
    /// "Total" row. Columns are the partitioning columns followed by #Rows,
    /// #Files and Size. Partition detail is loaded through the batched bulk
    /// path; file descriptors are never touched.
    pub fn table_stats(&self) -> CatalogResult<TableStatsResult> {
        let fs = self.as_fs().ok_or_else(|| {
            CatalogError::InconsistentMetadata(format!(
                "table {} is not filesystem-backed and has no partition stats",
                self.full_name()
            ))
        })?;
        let key_cols = &self.columns[..fs.num_partition_cols()];
        let mut column_names: Vec<String> =
            key_cols.iter().map(|c| c.name().to_string()).collect();
        column_names.extend(["#Rows".to_string(), "#Files".to_string(), "Size".to_string()]);

        let mut rows = Vec::new();
        let mut total_rows = 0i64;
        let mut total_files = 0u64;
        let mut total_size = 0u64;
        for partition in fs.load_all_partitions()? {
            let mut row: Vec<String> =
                partition.values().iter().map(|v| v.to_string()).collect();
            row.push(partition.row_count().to_string());
            row.push(partition.num_files().to_string());
            row.push(partition.size_bytes().to_string());
            if partition.row_count() > 0 {
                total_rows += partition.row_count();
            }
            total_files += partition.num_files();
            total_size += partition.size_bytes();
            rows.push(row);
        }
        let mut total_row = vec![String::new(); key_cols.len()];
        if let Some(first) = total_row.first_mut() {
            *first = "Total".to_string();
        }
        total_row.push(total_rows.to_string());
        total_row.push(total_files.to_string());
        total_row.push(total_size.to_string());
        rows.push(total_row);
        Ok(TableStatsResult { column_names, rows })
    }
}

/// Partitioning metadata and partition cache of a filesystem-backed table.
pub struct FsTable {
    db_name: String,
    table_name: String,
    num_partition_cols: usize,
    null_partition_key_value: String,
    location: Option<String>,
    /// Compact (id -> key values) listing, available without loading any
    /// partition. BTreeMap keeps bulk loads and listings in ascending id
    /// order, stable for the lifetime of the table.
    partition_keys: BTreeMap<PartitionId, Vec<LiteralValue>>,
    /// Per partitioning column: the ids of partitions whose value for that
    /// column is NULL. Built once at table-load time.
    null_partition_ids: Vec<HashSet<PartitionId>>,
    partitions: LazyMap<PartitionId, LocalFsPartition>,
    provider: Arc<dyn MetadataProvider>,
}

impl FsTable {
    fn new(
        meta: &TableMetadata,
        db_name: String,
        table_name: String,
        provider: Arc<dyn MetadataProvider>,
    ) -> CatalogResult<Self> {
        if meta.num_partition_cols > meta.columns.len() {
            return Err(CatalogError::InconsistentMetadata(format!(
                "table {}.{} declares {} partitioning columns but only {} columns",
                db_name,
                table_name,
                meta.num_partition_cols,
                meta.columns.len()
            )));
        }
        let mut null_partition_ids = vec![HashSet::new(); meta.num_partition_cols];
        for (id, values) in &meta.partition_keys {
            if values.len() != meta.num_partition_cols {
                return Err(CatalogError::InconsistentMetadata(format!(
                    "partition {} of {}.{} has {} key values but the table declares {} partitioning columns",
                    id,
                    db_name,
                    table_name,
                    values.len(),
                    meta.num_partition_cols
                )));
            }
            for (col, value) in values.iter().enumerate() {
                if value.is_null() {
                    null_partition_ids[col].insert(*id);
                }
            }
        }
        Ok(FsTable {
            db_name,
            table_name,
            num_partition_cols: meta.num_partition_cols,
            null_partition_key_value: meta.null_partition_key_value.clone(),
            location: meta.location.clone(),
            partition_keys: meta.partition_keys.clone(),
            null_partition_ids,
            partitions: LazyMap::new(),
            provider,
        })
    }

    /// The sentinel string this table's metastore uses to represent NULL in
    /// a partition path. Surfaced so callers can interpret raw key strings;
    /// the in-memory model itself uses `LiteralValue::Null`.
    pub fn null_partition_key_value(&self) -> &str {
        &self.null_partition_key_value
    }

    /// Get the table's storage location
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Number of partitioning columns (the leading columns of the table)
    pub fn num_partition_cols(&self) -> usize {
        self.num_partition_cols
    }

    pub fn num_partitions(&self) -> usize {
        self.partition_keys.len()
    }

    /// All partition ids in ascending order, without loading any partition
    pub fn partition_ids(&self) -> Vec<PartitionId> {
        self.partition_keys.keys().copied().collect()
    }

    /// Ids of the partitions whose key value for the given partitioning
    /// column ordinal is NULL. Answered from the index built at table-load
    /// time; never loads partition objects.
    pub fn null_partition_ids(&self, col: usize) -> CatalogResult<&HashSet<PartitionId>> {
        self.null_partition_ids.get(col).ok_or_else(|| {
            CatalogError::InconsistentMetadata(format!(
                "column ordinal {} is not a partitioning column of {}.{}",
                col, self.db_name, self.table_name
            ))
        })
    }

    /// Load one partition's full detail, or return the cached instance.
    pub fn load_partition(&self, id: PartitionId) -> CatalogResult<Arc<LocalFsPartition>> {
        if !self.partition_keys.contains_key(&id) {
            return Err(CatalogError::PartitionNotFound(
                format!("{}.{}", self.db_name, self.table_name),
                id,
            ));
        }
        self.partitions.get_or_try_init(&id, || {
            debug!(
                "loading partition {} of {}.{}",
                id, self.db_name, self.table_name
            );
            let mut fetched =
                self.provider
                    .get_partitions_by_ids(&self.db_name, &self.table_name, &[id])?;
            let meta = fetched.remove(&id).ok_or_else(|| {
                CatalogError::InconsistentMetadata(format!(
                    "provider returned no metadata for partition {} of {}.{}",
                    id, self.db_name, self.table_name
                ))
            })?;
            LocalFsPartition::new(
                meta,
                self.num_partition_cols,
                self.db_name.clone(),
                self.table_name.clone(),
                Arc::clone(&self.provider),
            )
        })
    }

    /// Load every partition of the table, batching the provider calls to
    /// bound round trips. The returned order is ascending by id and stable
    /// across repeated calls on the same table instance.
    pub fn load_all_partitions(&self) -> CatalogResult<Vec<Arc<LocalFsPartition>>> {
        let missing: Vec<PartitionId> = self
            .partition_keys
            .keys()
            .copied()
            .filter(|id| self.partitions.get(id).is_none())
            .collect();
        if !missing.is_empty() {
            debug!(
                "bulk loading {} partitions of {}.{}",
                missing.len(),
                self.db_name,
                self.table_name
            );
        }
        for chunk in missing.chunks(PARTITION_FETCH_BATCH_SIZE) {
            let mut fetched =
                self.provider
                    .get_partitions_by_ids(&self.db_name, &self.table_name, chunk)?;
            for id in chunk {
                let meta = fetched.remove(id);
                self.partitions.get_or_try_init(id, || {
                    let meta = meta.ok_or_else(|| {
                        CatalogError::InconsistentMetadata(format!(
                            "provider returned no metadata for partition {} of {}.{}",
                            id, self.db_name, self.table_name
                        ))
                    })?;
                    LocalFsPartition::new(
                        meta,
                        self.num_partition_cols,
                        self.db_name.clone(),
                        self.table_name.clone(),
                        Arc::clone(&self.provider),
                    )
                })?;
            }
        }
        let mut out = Vec::with_capacity(self.partition_keys.len());
        for id in self.partition_keys.keys() {
            out.push(self.load_partition(*id)?);
        }
        Ok(out)
    }
}

/// Tabular result of `LocalTable::table_stats`: one row per partition plus a
/// trailing "Total" row.
pub struct TableStatsResult {
    column_names: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TableStatsResult {
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }
}
