use thiserror::Error;

/// The record store could not be read or written.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

/// A free-text reference failed to resolve to a worker row.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no worker matches reference {0:?}")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Outbound message delivery failed.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("transport error: {0}")]
    Http(String),
    #[error("bot api rejected the message: {0}")]
    Api(String),
}
