//! Recurring daily-flush task.

use chrono::{NaiveTime, Utc};
use payday::{DestinationStore, Messenger, RecordStore, schedule};
use tracing::info;

use crate::state::AppState;

/// Spawns the flush loop: sleep until the next fire instant in the bot's
/// timezone, run one flush cycle, repeat. The loop is the sole caller of
/// `drain`, so one fire can never overlap another.
pub fn spawn<S, M, D>(state: AppState<S, M, D>, at: NaiveTime) -> tokio::task::JoinHandle<()>
where
    S: RecordStore,
    M: Messenger,
    D: DestinationStore,
{
    tokio::spawn(async move {
        loop {
            let now = Utc::now().with_timezone(&state.timezone);
            let next = schedule::next_fire(now, at);
            info!(next = %next, "next daily flush scheduled");

            let wait = (next - now).to_std().unwrap_or_default();
            tokio::time::sleep(wait).await;

            let outcome = schedule::flush_once(
                &state.ledger,
                state.messenger.as_ref(),
                state.destination.as_ref(),
                state.today(),
            )
            .await;
            info!(?outcome, "daily flush cycle finished");
        }
    })
}
