/// Outcome kinds surfaced to callers of the resolver.
///
/// Only the kind is user-visible; details of upstream failures are logged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    /// Missing or invalid session. Recoverable by signing in again.
    #[error("authentication required")]
    Unauthenticated,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("lesson not found")]
    NotFound,
    #[error("access denied")]
    Forbidden,
    /// Data store or object store failure, or timeout. The caller may retry.
    #[error("upstream failure: {0}")]
    UpstreamFailure(String),
}
