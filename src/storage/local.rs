use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tokio::fs::{self, File};
use uuid::Uuid;

use super::error::StoreError;
use super::traits::{ObjectStore, SignedUrl};
use crate::config::StorageConfig;

/// Route prefix under which signed objects are served.
pub const SIGNED_OBJECT_PATH: &str = "/storage/object/sign";

#[derive(Debug, Serialize, Deserialize)]
struct SignedObjectClaims {
    /// Public id of the object the token is bound to.
    sub: Uuid,
    iat: i64,
    exp: i64,
    jti: Uuid,
}

/// Filesystem-backed object store issuing JWT-signed download links.
///
/// Objects live at `{root}/{storage_key}`. A signed URL looks like
/// `{public_url}/storage/object/sign/{object_id}?token={jwt}`; neither the
/// path nor the token carries the storage key, the download route maps the
/// object id back to it.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
    public_url: String,
    secret: Arc<Vec<u8>>,
}

impl LocalObjectStore {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            root: config.root,
            public_url: config.public_url,
            secret: Arc::new(config.signing_secret),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a key to a path inside the root. Keys are relative paths made of
    /// `[A-Za-z0-9._-]` segments; anything else is rejected.
    fn object_path(&self, storage_key: &str) -> Result<PathBuf, StoreError> {
        validate_key(storage_key)?;
        Ok(self.root.join(storage_key))
    }

    /// Sign a link to `object_id` as if issued at `issued_at`.
    pub fn sign_at(&self, object_id: Uuid, ttl: Duration, issued_at: DateTime<Utc>) -> Result<SignedUrl, StoreError> {
        let ttl = chrono::Duration::from_std(ttl).map_err(|err| StoreError::Rejected(err.to_string()))?;
        let expires_at = issued_at + ttl;

        let claims = SignedObjectClaims {
            sub: object_id,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
        };

        let token = jsonwebtoken::encode(&Header::default(), &claims, &EncodingKey::from_secret(&self.secret))
            .map_err(|err| StoreError::Rejected(err.to_string()))?;

        Ok(SignedUrl {
            url: format!("{}{}/{}?token={}", self.public_url, SIGNED_OBJECT_PATH, object_id, token),
            expires_at,
        })
    }

    /// Check a download token and return the object id it grants.
    pub fn verify(&self, token: &str) -> Result<Uuid, StoreError> {
        let mut validation = Validation::default();
        validation.validate_exp = true;
        validation.leeway = 0;

        jsonwebtoken::decode::<SignedObjectClaims>(token, &DecodingKey::from_secret(&self.secret), &validation)
            .map(|data| data.claims.sub)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => StoreError::Expired,
                _ => StoreError::Rejected(err.to_string()),
            })
    }

    /// Open an object for streaming. Only called after a token check.
    pub async fn open(&self, storage_key: &str) -> Result<File, StoreError> {
        let path = self.object_path(storage_key)?;
        Ok(File::open(&path).await?)
    }

    /// Write an object, creating parent directories as needed.
    pub async fn put(&self, storage_key: &str, data: &[u8]) -> Result<(), StoreError> {
        let path = self.object_path(storage_key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&path, data).await?;
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn create_signed_url(&self, object_id: Uuid, storage_key: &str, ttl: Duration) -> Result<SignedUrl, StoreError> {
        let path = self.object_path(storage_key)?;
        let meta = fs::metadata(&path).await?;
        if !meta.is_file() {
            return Err(StoreError::NotFound(object_id.to_string()));
        }

        self.sign_at(object_id, ttl, Utc::now())
    }
}

fn validate_key(storage_key: &str) -> Result<(), StoreError> {
    let invalid = || StoreError::InvalidKey(storage_key.to_string());

    if storage_key.is_empty() || storage_key.starts_with('/') {
        return Err(invalid());
    }

    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '/');
    if !storage_key.chars().all(allowed) {
        return Err(invalid());
    }

    if !Path::new(storage_key)
        .components()
        .all(|component| matches!(component, Component::Normal(_)))
    {
        return Err(invalid());
    }

    Ok(())
}
