//! # Store Error Types
//!
//! Error types for persistence operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds categorization                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller decides: save failure = durability warning (in-memory state     │
//! │  already mutated); load failure = fall back to bootstrapped defaults    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Persistence operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Data could not be serialized or deserialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An interchange document failed the shallow shape check.
    ///
    /// ## When This Occurs
    /// - A top-level collection key is missing
    /// - A collection key holds something other than an array
    /// - The document root is not an object
    #[error("Invalid collections document: {reason}")]
    Shape { reason: String },
}

impl StoreError {
    /// Shorthand for a shape-check failure.
    pub fn shape(reason: impl Into<String>) -> Self {
        StoreError::Shape {
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;
