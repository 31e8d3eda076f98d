//! # Corner POS Persistence Gateway
//!
//! File-backed storage for the shop's collection set, plus export/import
//! of portable interchange documents.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          corner-store                                   │
//! │                                                                         │
//! │   ┌──────────────┐          ┌──────────────────┐                        │
//! │   │  JsonStore   │          │   interchange    │                        │
//! │   │  load/save   │          │  export/import   │                        │
//! │   └──────┬───────┘          └────────┬─────────┘                        │
//! │          │                           │                                  │
//! │          └──────────┬────────────────┘                                  │
//! │                     ▼                                                   │
//! │          corner_core::Shop  (one JSON document, five collections)       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine mutates the in-memory [`corner_core::Shop`] first and persists
//! after; a failed save is a durability warning, never a rollback.

pub mod error;
pub mod file;
pub mod interchange;

pub use error::{StoreError, StoreResult};
pub use file::JsonStore;
