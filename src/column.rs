// Column Module
//
// This module defines the Column type that describes one column of a
// cached table, and the semantic column types the planner understands.

use serde::{Deserialize, Serialize};

/// Semantic column types supported by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Boolean,
    TinyInt,
    SmallInt,
    Int,
    BigInt,
    Float,
    Double,
    String,
    Timestamp,
    Date,
}

impl ColumnType {
    /// Convert a string representation to a ColumnType
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_uppercase().as_str() {
            "BOOL" | "BOOLEAN" => Ok(ColumnType::Boolean),
            "TINYINT" => Ok(ColumnType::TinyInt),
            "SMALLINT" => Ok(ColumnType::SmallInt),
            "INT" | "INTEGER" => Ok(ColumnType::Int),
            "BIGINT" => Ok(ColumnType::BigInt),
            "FLOAT" | "REAL" => Ok(ColumnType::Float),
            "DOUBLE" => Ok(ColumnType::Double),
            "STRING" | "TEXT" | "VARCHAR" | "CHAR" => Ok(ColumnType::String),
            "TIMESTAMP" | "DATETIME" => Ok(ColumnType::Timestamp),
            "DATE" => Ok(ColumnType::Date),
            _ => Err(format!("Unknown column type: {}", s)),
        }
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::TinyInt => "TINYINT",
            ColumnType::SmallInt => "SMALLINT",
            ColumnType::Int => "INT",
            ColumnType::BigInt => "BIGINT",
            ColumnType::Float => "FLOAT",
            ColumnType::Double => "DOUBLE",
            ColumnType::String => "STRING",
            ColumnType::Timestamp => "TIMESTAMP",
            ColumnType::Date => "DATE",
        }
    }
}

/// Represents one column of a table in declared order. Partitioning columns
/// occupy the leading positions of a table's column list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name
    name: String,
    /// Semantic type
    col_type: ColumnType,
    /// Ordinal position within the table's column list
    position: usize,
}

impl Column {
    /// Create a new column
    pub fn new(name: impl Into<String>, col_type: ColumnType, position: usize) -> Self {
        Column {
            name: name.into(),
            col_type,
            position,
        }
    }

    /// Get the column name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the column type
    pub fn col_type(&self) -> ColumnType {
        self.col_type
    }

    /// Get the ordinal position of this column
    pub fn position(&self) -> usize {
        self.position
    }
}
