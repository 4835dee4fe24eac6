use std::future::Future;

use crate::error::{SendError, StoreError};
use crate::model::{ChatId, NewWorker, WorkerRecord};

/// The spreadsheet-backed worker table: a remote, append-only sequence of
/// rows with unbounded latency and possible transient failure.
pub trait RecordStore: Send + Sync + 'static {
    /// Fetches the full table in row order. Row numbers are assigned from
    /// position by the implementation, 1-based and gapless.
    fn read_all(&self) -> impl Future<Output = Result<Vec<WorkerRecord>, StoreError>> + Send;

    /// Appends one worker and returns the assigned row number.
    fn append_worker(
        &self,
        worker: &NewWorker,
    ) -> impl Future<Output = Result<u32, StoreError>> + Send;
}

/// Outbound message delivery to a chat.
pub trait Messenger: Send + Sync + 'static {
    fn send_message(
        &self,
        chat: ChatId,
        text: &str,
    ) -> impl Future<Output = Result<(), SendError>> + Send;
}

/// Durable single-value store for the daily-summary destination chat.
/// Overwrite semantics: last writer wins, reads see the latest committed value.
pub trait DestinationStore: Send + Sync + 'static {
    fn load(&self) -> Result<Option<ChatId>, StoreError>;
    fn save(&self, chat: ChatId) -> Result<(), StoreError>;
}
