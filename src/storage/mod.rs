mod error;
mod local;
mod traits;

pub use error::StoreError;
pub use local::{LocalObjectStore, SIGNED_OBJECT_PATH};
pub use traits::{ObjectStore, SignedUrl};

use sha2::{Digest, Sha256};

/// Short, stable fingerprint of a storage key for log lines.
pub fn key_fingerprint(storage_key: &str) -> String {
    let digest = Sha256::digest(storage_key.as_bytes());
    hex::encode(&digest[..6])
}
