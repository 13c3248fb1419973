use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::error::StoreError;

/// A capability URL granting temporary read access to one object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedUrl {
    pub url: String,
    pub expires_at: DateTime<Utc>,
}

/// Object storage holding lesson videos.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Mint a URL for the object at `storage_key` that stops working after `ttl`.
    ///
    /// The URL names the object by `object_id` only; `storage_key` never
    /// appears in it. Every call yields a distinct URL.
    async fn create_signed_url(&self, object_id: Uuid, storage_key: &str, ttl: Duration) -> Result<SignedUrl, StoreError>;
}
