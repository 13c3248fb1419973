/// Errors raised by an object store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Temporary failure; the same call may succeed if repeated.
    #[error("object store unavailable: {0}")]
    Transient(String),
    /// The store refused the request (bad credentials, bad signature).
    #[error("object store rejected request: {0}")]
    Rejected(String),
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("signed url expired")]
    Expired,
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

impl StoreError {
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Transient(_))
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => StoreError::NotFound(err.to_string()),
            std::io::ErrorKind::PermissionDenied => StoreError::Rejected(err.to_string()),
            _ => StoreError::Transient(err.to_string()),
        }
    }
}
