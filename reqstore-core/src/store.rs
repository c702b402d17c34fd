//! `DocumentStore` - the public CRUD surface for request body payloads.
//!
//! The store owns exactly one backend connection for its lifetime.
//! Lifecycle calls (`connect`/`try_connect`/`close`) are idempotent and
//! take the write half of the lock; save/get/delete share the read half,
//! so callers may issue them concurrently and ordering between them is
//! whatever the driver provides. A `close` racing an in-flight `save`
//! resolves in whichever order the lock grants; no outcome is guaranteed
//! beyond that. Timeouts and cancellation are the caller's problem.
//!
//! Error propagation is deliberately asymmetric (carried over from the
//! system this replaces): `connect` swallows failures and only logs,
//! `delete_many` reports failure as `false`, `save` returns a generic
//! error with the cause logged, and only `get` propagates causes. The
//! strict variants (`try_connect`, `state`) make connection health
//! observable instead of leaving the swallowed path as the only option.

use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::backend::{DocumentBackend, MongoBackend};
use crate::config::StoreConfig;
use crate::document::{project, StoredRequestBody};
use crate::error::{Result, StoreError};

/// Externally observable connection state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

/// Persistence accessor for request body payloads.
///
/// Holds one injected backend; construct with [`DocumentStore::new`] for
/// tests or [`DocumentStore::from_env`] for the production MongoDB backend.
pub struct DocumentStore<B: DocumentBackend = MongoBackend> {
    backend: RwLock<B>,
    config: StoreConfig,
}

impl DocumentStore<MongoBackend> {
    /// Store over the MongoDB backend, configured from the environment
    pub fn from_env() -> Self {
        Self::new(MongoBackend::new(), StoreConfig::from_env())
    }
}

impl<B: DocumentBackend> DocumentStore<B> {
    pub fn new(backend: B, config: StoreConfig) -> Self {
        Self {
            backend: RwLock::new(backend),
            config,
        }
    }

    /// Current connection state
    pub async fn state(&self) -> ConnectionState {
        if self.backend.read().await.is_connected() {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }

    /// Best-effort connect: failures are logged and swallowed, so boot can
    /// proceed with the store unreachable. Callers that need certainty use
    /// [`DocumentStore::try_connect`] or check [`DocumentStore::state`].
    pub async fn connect(&self) {
        if let Err(err) = self.try_connect().await {
            warn!(error = %err, "document store connection failed");
        }
    }

    /// Strict connect: no-op when already connected, otherwise establishes
    /// the connection and surfaces any failure.
    pub async fn try_connect(&self) -> Result<()> {
        let mut backend = self.backend.write().await;
        if backend.is_connected() {
            return Ok(());
        }
        backend
            .connect(&self.config)
            .await
            .map_err(|cause| StoreError::connection("failed to connect to document store", cause))?;
        info!(host = %self.config.host, db = %self.config.db_name, "connected to document store");
        Ok(())
    }

    /// Idempotent disconnect. Unlike connect, failures here surface to the
    /// caller: a connection that cannot be torn down is worth knowing about.
    pub async fn close(&self) -> Result<()> {
        let mut backend = self.backend.write().await;
        if !backend.is_connected() {
            return Ok(());
        }
        backend
            .disconnect()
            .await
            .map_err(|cause| StoreError::connection("failed to close store connection", cause))?;
        info!("disconnected from document store");
        Ok(())
    }

    /// Persist a payload and return its store-assigned public id
    pub async fn save(&self, payload: impl Into<String>) -> Result<String> {
        let document = StoredRequestBody::new(payload.into());
        let backend = self.backend.read().await;
        match backend.insert(&document).await {
            Ok(oid) => {
                let record = project(StoredRequestBody {
                    id: Some(oid),
                    ..document
                })?;
                Ok(record.id)
            }
            Err(err) => {
                error!(error = ?err, "failed to save request body");
                Err(StoreError::save_failed())
            }
        }
    }

    /// Fetch the payload stored under `id`.
    ///
    /// Distinguishes a missing document (`NotFound`) from a failed lookup
    /// (`Persistence` with the cause attached). A malformed id cannot be
    /// looked up at all and counts as a failed lookup.
    pub async fn get(&self, id: &str) -> Result<String> {
        let oid = ObjectId::parse_str(id).map_err(|err| {
            error!(id = %id, error = %err, "request body id is not a valid object id");
            StoreError::lookup(anyhow::Error::new(err))
        })?;

        let backend = self.backend.read().await;
        match backend.find_by_id(oid).await {
            Ok(Some(document)) => Ok(project(document)?.request),
            Ok(None) => Err(StoreError::not_found(id)),
            Err(err) => {
                error!(id = %id, error = ?err, "failed to fetch request body");
                Err(StoreError::lookup(err))
            }
        }
    }

    /// Bulk delete by public id. Failure is reported as `false`, never as
    /// an error; one malformed id fails the whole batch. Zero matching ids
    /// is success.
    pub async fn delete_many(&self, ids: &[String]) -> bool {
        if ids.is_empty() {
            return true;
        }

        let mut object_ids = Vec::with_capacity(ids.len());
        for id in ids {
            match ObjectId::parse_str(id) {
                Ok(oid) => object_ids.push(oid),
                Err(err) => {
                    error!(id = %id, error = %err, "failed to delete request bodies");
                    return false;
                }
            }
        }

        let backend = self.backend.read().await;
        match backend.delete_by_ids(&object_ids).await {
            Ok(deleted) => {
                info!(requested = ids.len(), deleted, "deleted request bodies");
                true
            }
            Err(err) => {
                error!(error = ?err, "failed to delete request bodies");
                false
            }
        }
    }
}
