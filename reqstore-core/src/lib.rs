//! reqstore-core - request body persistence over a document store
//!
//! This crate provides:
//! - Environment-driven connection configuration with URI assembly
//! - A `DocumentBackend` trait seam plus the MongoDB/DocumentDB implementation
//! - `DocumentStore`, the CRUD surface for request body payloads
//! - The projection from stored documents to the public record shape
//!
//! ## Architecture
//!
//! ```text
//! caller → DocumentStore ── connect/close ──→ DocumentBackend (MongoBackend)
//!              │                                     │
//!              └── save/get/delete_many ──→ requestbodies collection
//!                           ↓
//!                   project() → RequestBody { id, request }
//! ```

pub mod backend;
pub mod config;
pub mod document;
pub mod error;
pub mod store;

pub use backend::{DocumentBackend, MongoBackend};
pub use config::StoreConfig;
pub use document::{project, RequestBody, StoredRequestBody};
pub use error::{Result, StoreError};
pub use store::{ConnectionState, DocumentStore};
