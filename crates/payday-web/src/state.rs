use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use payday::{DestinationStore, Ledger, Messenger, RecordStore};
use std::sync::Arc;

/// Shared handler state: the process-wide ledger plus the three external
/// collaborators. Generic so tests can wire in-memory stand-ins.
pub struct AppState<S, M, D> {
    pub ledger: Ledger,
    pub store: Arc<S>,
    pub messenger: Arc<M>,
    pub destination: Arc<D>,
    pub timezone: Tz,
}

// Derived Clone would demand Clone on S/M/D even though they sit behind Arcs.
impl<S, M, D> Clone for AppState<S, M, D> {
    fn clone(&self) -> Self {
        AppState {
            ledger: self.ledger.clone(),
            store: Arc::clone(&self.store),
            messenger: Arc::clone(&self.messenger),
            destination: Arc::clone(&self.destination),
            timezone: self.timezone,
        }
    }
}

impl<S, M, D> AppState<S, M, D>
where
    S: RecordStore,
    M: Messenger,
    D: DestinationStore,
{
    pub fn new(store: S, messenger: M, destination: D, timezone: Tz) -> Self {
        AppState {
            ledger: Ledger::new(),
            store: Arc::new(store),
            messenger: Arc::new(messenger),
            destination: Arc::new(destination),
            timezone,
        }
    }

    /// Today's date in the bot's timezone; used for both the show-ledger
    /// reply and the scheduled flush so the two stamps agree.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.timezone).date_naive()
    }
}
