//! MongoDB client wrapper.

use bson::doc;
use mongodb::{Client, Database};
use tracing::info;

use crate::types::{Result, SignpostError};

/// MongoDB client wrapper with connection timeouts and a startup ping.
#[derive(Clone)]
pub struct MongoClient {
    client: Client,
    db_name: String,
}

impl MongoClient {
    /// Create a new MongoDB client and verify the connection.
    pub async fn new(uri: &str, db_name: &str) -> Result<Self> {
        info!("Connecting to MongoDB at {}", uri);

        // Use serverSelectionTimeoutMS to avoid hanging on unreachable MongoDB
        let timeout_uri = if uri.contains('?') {
            format!("{}&serverSelectionTimeoutMS=3000&connectTimeoutMS=3000", uri)
        } else {
            format!("{}?serverSelectionTimeoutMS=3000&connectTimeoutMS=3000", uri)
        };

        let client = Client::with_uri_str(&timeout_uri)
            .await
            .map_err(|e| SignpostError::Unavailable(format!("Failed to connect to MongoDB: {}", e)))?;

        client
            .database(db_name)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| SignpostError::Unavailable(format!("MongoDB ping failed: {}", e)))?;

        info!("Connected to MongoDB database '{}'", db_name);

        Ok(Self {
            client,
            db_name: db_name.to_string(),
        })
    }

    /// The database handle.
    pub fn database(&self) -> Database {
        self.client.database(&self.db_name)
    }

    /// Lightweight connectivity probe for the readiness endpoint.
    pub async fn ping(&self) -> Result<()> {
        self.database()
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| SignpostError::Unavailable(format!("MongoDB ping failed: {}", e)))?;
        Ok(())
    }

    /// Get the database name.
    pub fn db_name(&self) -> &str {
        &self.db_name
    }
}
