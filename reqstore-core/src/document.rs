//! Document shapes and the public projection.
//!
//! The wire shape carries the store-native identifier (`_id`) and the
//! revision counter (`__v`) written by the previous backend generation.
//! Neither may ever reach a caller: [`project`] is the single place where a
//! stored document becomes a public record, and every materialized document
//! goes through it.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// On-the-wire document shape for the `requestbodies` collection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredRequestBody {
    /// Store-assigned identifier; `None` until the insert round-trips
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Opaque caller payload, persisted verbatim
    pub request: String,

    /// Internal revision counter; accepted on input, never exposed
    #[serde(rename = "__v", skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
}

impl StoredRequestBody {
    /// New unsaved document wrapping a caller payload
    pub fn new(request: impl Into<String>) -> Self {
        Self {
            id: None,
            request: request.into(),
            version: None,
        }
    }
}

/// Public record shape: exactly `id` and `request`, nothing internal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequestBody {
    pub id: String,
    pub request: String,
}

/// Materialize a stored document for callers: the native identifier is
/// hex-encoded into `id`, and the identifier and revision fields are dropped.
pub fn project(document: StoredRequestBody) -> Result<RequestBody> {
    let id = document
        .id
        .ok_or_else(|| StoreError::invalid_document("stored document has no native identifier"))?;
    Ok(RequestBody {
        id: id.to_hex(),
        request: document.request,
    })
}
