use thiserror::Error;

use crate::provider::PartitionId;

/// Errors surfaced by catalog lookups and lazy metadata loads
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Database not found: {0}")]
    DatabaseNotFound(String),
    #[error("Table not found: {0}.{1}")]
    TableNotFound(String, String),
    #[error("Partition {1} not found in table {0}")]
    PartitionNotFound(String, PartitionId),
    #[error("Metadata provider unavailable: {0}")]
    ProviderUnavailable(String),
    #[error("Inconsistent metadata: {0}")]
    InconsistentMetadata(String),
}

impl CatalogError {
    /// True for the "requested object does not exist" family, as opposed to
    /// infrastructure trouble reaching or interpreting the metastore.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CatalogError::DatabaseNotFound(_)
                | CatalogError::TableNotFound(_, _)
                | CatalogError::PartitionNotFound(_, _)
        )
    }
}

/// Catalog operation result
pub type CatalogResult<T> = Result<T, CatalogError>;
