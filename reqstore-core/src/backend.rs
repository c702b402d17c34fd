//! Backend seam between `DocumentStore` and the actual driver.
//!
//! The trait exists so the connection lifecycle and CRUD semantics can be
//! exercised against an in-memory double; `MongoBackend` is the production
//! implementation on the async MongoDB driver (DocumentDB-compatible).

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::options::{AuthMechanism, ClientOptions, Tls, TlsOptions};
use mongodb::{Client, Collection};
use tracing::{debug, info};

use crate::config::StoreConfig;
use crate::document::StoredRequestBody;

/// Collection name the previous backend generation wrote to
const COLLECTION_NAME: &str = "requestbodies";

/// Raw document operations against one backing store connection.
///
/// `connect` and `disconnect` own the connection lifecycle; the CRUD
/// methods fail when called while disconnected. Causes are `anyhow`
/// chains; `DocumentStore` decides what reaches callers.
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    /// Establish the connection described by `config`
    async fn connect(&mut self, config: &StoreConfig) -> Result<()>;

    /// Tear down the live connection, if any
    async fn disconnect(&mut self) -> Result<()>;

    /// Whether a live connection is held
    fn is_connected(&self) -> bool;

    /// Persist one document, returning the store-assigned identifier
    async fn insert(&self, document: &StoredRequestBody) -> Result<ObjectId>;

    /// Look up one document by native identifier
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<StoredRequestBody>>;

    /// Delete every document matching one of `ids`, returning the count
    async fn delete_by_ids(&self, ids: &[ObjectId]) -> Result<u64>;
}

/// MongoDB driver implementation of [`DocumentBackend`]
#[derive(Debug, Default)]
pub struct MongoBackend {
    client: Option<Client>,
    collection: Option<Collection<StoredRequestBody>>,
}

impl MongoBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn collection(&self) -> Result<&Collection<StoredRequestBody>> {
        self.collection
            .as_ref()
            .ok_or_else(|| anyhow!("not connected to the document store"))
    }
}

#[async_trait]
impl DocumentBackend for MongoBackend {
    async fn connect(&mut self, config: &StoreConfig) -> Result<()> {
        let uri = config.connection_uri();
        let mut options = ClientOptions::parse(&uri)
            .await
            .context("failed to parse connection uri")?;

        options.retry_writes = Some(config.retry_writes);
        if config.tls {
            let tls_options = TlsOptions::builder()
                .ca_file_path(Some(config.ca_file_path()))
                .build();
            options.tls = Some(Tls::Enabled(tls_options));
        }
        // Fixed auth mechanism; DocumentDB only speaks SCRAM-SHA-1.
        if let Some(credential) = options.credential.as_mut() {
            credential.mechanism = Some(AuthMechanism::ScramSha1);
        }

        let client = Client::with_options(options).context("failed to build client")?;
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .context("failed to ping document store")?;

        let collection = client
            .database(&config.db_name)
            .collection::<StoredRequestBody>(COLLECTION_NAME);
        self.client = Some(client);
        self.collection = Some(collection);
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<()> {
        self.collection = None;
        if let Some(client) = self.client.take() {
            client.shutdown().await;
            debug!("document store client shut down");
        }
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.client.is_some()
    }

    async fn insert(&self, document: &StoredRequestBody) -> Result<ObjectId> {
        let result = self
            .collection()?
            .insert_one(document)
            .await
            .context("insert failed")?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| anyhow!("store assigned a non-objectid identifier"))
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<StoredRequestBody>> {
        self.collection()?
            .find_one(doc! { "_id": id })
            .await
            .context("lookup failed")
    }

    async fn delete_by_ids(&self, ids: &[ObjectId]) -> Result<u64> {
        let result = self
            .collection()?
            .delete_many(doc! { "_id": { "$in": ids.to_vec() } })
            .await
            .context("bulk delete failed")?;
        info!(deleted = result.deleted_count, "bulk delete completed");
        Ok(result.deleted_count)
    }
}
