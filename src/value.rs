// Partition Key Value Module
//
// This module defines the typed literal used for partition key values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A typed partition key literal. NULL is an explicit variant, never a
/// sentinel string: the metastore's NULL sentinel is decoded at the
/// MetadataProvider boundary before values reach this model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LiteralValue {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
    Boolean(bool),
}

impl LiteralValue {
    /// Check whether this value is the NULL literal
    pub fn is_null(&self) -> bool {
        matches!(self, LiteralValue::Null)
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Null => write!(f, "NULL"),
            LiteralValue::Integer(i) => write!(f, "{}", i),
            LiteralValue::Float(fl) => write!(f, "{}", fl),
            LiteralValue::Text(s) => write!(f, "{}", s),
            LiteralValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}
