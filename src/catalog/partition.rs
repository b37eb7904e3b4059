// Partition Module
//
// One partition of a filesystem-backed table: key values aligned with the
// table's partitioning columns, storage location, statistics, and a lazily
// loaded list of file descriptors.

use std::sync::Arc;

use log::debug;
use once_cell::sync::OnceCell;

use crate::error::{CatalogError, CatalogResult};
use crate::fs::FileDescriptor;
use crate::provider::{MetadataProvider, PartitionId, PartitionMetadata};
use crate::value::LiteralValue;

/// A fully loaded partition. Constructed once per id by its owning table and
/// returned by identity thereafter; file descriptors are fetched on first
/// access.
pub struct LocalFsPartition {
    id: PartitionId,
    db_name: String,
    table_name: String,
    values: Vec<LiteralValue>,
    location: String,
    row_count: i64,
    num_files: u64,
    size_bytes: u64,
    provider: Arc<dyn MetadataProvider>,
    file_descriptors: OnceCell<Vec<FileDescriptor>>,
}

impl std::fmt::Debug for LocalFsPartition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalFsPartition")
            .field("id", &self.id)
            .field("db_name", &self.db_name)
            .field("table_name", &self.table_name)
            .field("values", &self.values)
            .field("location", &self.location)
            .field("row_count", &self.row_count)
            .field("num_files", &self.num_files)
            .field("size_bytes", &self.size_bytes)
            .finish_non_exhaustive()
    }
}

impl LocalFsPartition {
    pub(crate) fn new(
        meta: PartitionMetadata,
        num_partition_cols: usize,
        db_name: String,
        table_name: String,
        provider: Arc<dyn MetadataProvider>,
    ) -> CatalogResult<Self> {
        if meta.values.len() != num_partition_cols {
            return Err(CatalogError::InconsistentMetadata(format!(
                "partition {} of {}.{} has {} key values but the table declares {} partitioning columns",
                meta.id,
                db_name,
                table_name,
                meta.values.len(),
                num_partition_cols
            )));
        }
        Ok(LocalFsPartition {
            id: meta.id,
            db_name,
            table_name,
            values: meta.values,
            location: meta.location,
            row_count: meta.row_count,
            num_files: meta.num_files,
            size_bytes: meta.size_bytes,
            provider,
            file_descriptors: OnceCell::new(),
        })
    }

    /// Get the partition identifier
    pub fn id(&self) -> PartitionId {
        self.id
    }

    /// Get the storage location of this partition's data
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Row count statistic, -1 if unknown
    pub fn row_count(&self) -> i64 {
        self.row_count
    }

    pub fn num_files(&self) -> u64 {
        self.num_files
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Key values in partitioning-column order
    pub fn values(&self) -> &[LiteralValue] {
        &self.values
    }

    /// Get the key value for one partitioning column ordinal
    pub fn value(&self, col: usize) -> CatalogResult<&LiteralValue> {
        self.values.get(col).ok_or_else(|| {
            CatalogError::InconsistentMetadata(format!(
                "column ordinal {} is not a partitioning column of {}.{}",
                col, self.db_name, self.table_name
            ))
        })
    }

    /// Get this partition's file descriptors, fetching them from the
    /// provider on first access. Descriptors are validated before they are
    /// cached; a rejected fetch is surfaced and retried on the next call.
    pub fn file_descriptors(&self) -> CatalogResult<&[FileDescriptor]> {
        let fds = self.file_descriptors.get_or_try_init(|| {
            debug!(
                "loading file descriptors for partition {} of {}.{}",
                self.id, self.db_name, self.table_name
            );
            let fds =
                self.provider
                    .get_file_descriptors(&self.db_name, &self.table_name, self.id)?;
            for fd in &fds {
                fd.validate()?;
            }
            Ok::<_, CatalogError>(fds)
        })?;
        Ok(fds.as_slice())
    }
}
