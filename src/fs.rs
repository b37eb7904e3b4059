// File Placement Module
//
// Immutable descriptions of the data files backing a partition: file length
// and modification time, plus the ordered list of blocks with the disk ids
// holding each block's replicas. Block locality drives scan-range assignment,
// so the model rejects descriptors with missing locality information.

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};

/// One contiguous byte range of a data file and the disks holding its
/// replicas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileBlock {
    offset: u64,
    length: u64,
    disk_ids: Vec<u32>,
}

impl FileBlock {
    pub fn new(offset: u64, length: u64, disk_ids: Vec<u32>) -> Self {
        FileBlock {
            offset,
            length,
            disk_ids,
        }
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn length(&self) -> u64 {
        self.length
    }

    /// Identifiers of the disks holding replicas of this block
    pub fn disk_ids(&self) -> &[u32] {
        &self.disk_ids
    }

    pub fn num_replicas(&self) -> usize {
        self.disk_ids.len()
    }
}

/// An immutable description of one data file of a partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// File name relative to the partition location
    path: String,
    /// File length in bytes, always strictly positive
    length: u64,
    /// Modification time in milliseconds since the epoch
    modification_time_ms: i64,
    /// Blocks in ascending offset order
    blocks: Vec<FileBlock>,
}

impl FileDescriptor {
    pub fn new(
        path: impl Into<String>,
        length: u64,
        modification_time_ms: i64,
        blocks: Vec<FileBlock>,
    ) -> Self {
        FileDescriptor {
            path: path.into(),
            length,
            modification_time_ms,
            blocks,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn modification_time_ms(&self) -> i64 {
        self.modification_time_ms
    }

    pub fn blocks(&self) -> &[FileBlock] {
        &self.blocks
    }

    pub fn num_blocks(&self) -> usize {
        self.blocks.len()
    }

    pub fn block(&self, idx: usize) -> Option<&FileBlock> {
        self.blocks.get(idx)
    }

    /// Check the structural invariants of a provider-supplied descriptor:
    /// positive file length, at least one block, non-empty disk-id sets, and
    /// contiguous blocks in ascending offset order. The last block may be
    /// shorter than the sum would suggest, so block lengths are not checked
    /// against the file length.
    pub(crate) fn validate(&self) -> CatalogResult<()> {
        if self.length == 0 {
            return Err(CatalogError::InconsistentMetadata(format!(
                "file '{}' has non-positive length",
                self.path
            )));
        }
        if self.blocks.is_empty() {
            return Err(CatalogError::InconsistentMetadata(format!(
                "file '{}' has no blocks",
                self.path
            )));
        }
        let mut expected_offset = 0u64;
        for (i, block) in self.blocks.iter().enumerate() {
            if block.disk_ids.is_empty() {
                return Err(CatalogError::InconsistentMetadata(format!(
                    "file '{}' block {} reports no disk ids",
                    self.path, i
                )));
            }
            if block.offset != expected_offset {
                return Err(CatalogError::InconsistentMetadata(format!(
                    "file '{}' block {} starts at offset {} but {} was expected",
                    self.path, i, block.offset, expected_offset
                )));
            }
            expected_offset = expected_offset.saturating_add(block.length);
        }
        Ok(())
    }
}
