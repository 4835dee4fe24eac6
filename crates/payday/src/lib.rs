pub mod commands;
mod error;
pub mod format;
mod ledger;
mod model;
pub mod resolve;
pub mod schedule;
mod store;

pub use error::{ResolveError, SendError, StoreError};
pub use ledger::Ledger;
pub use model::{ChatId, NewWorker, PaymentEntry, RECEIVER_PLACEHOLDER, WorkerRecord};
pub use store::{DestinationStore, Messenger, RecordStore};
