use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SyncError {
    /// Cancellation was requested while blocked; the resource was not taken.
    #[error("stopped while waiting")]
    Stopped,
}

pub type SyncResult<T> = Result<T, SyncError>;
