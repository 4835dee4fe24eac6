//! The daily flush: drain the ledger once per scheduled fire and deliver the
//! formatted message to the destination chat.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone};
use tracing::{error, info};

use crate::format::format_ledger;
use crate::ledger::Ledger;
use crate::store::{DestinationStore, Messenger};

/// What a single scheduled fire did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlushOutcome {
    /// No destination chat has been set; the ledger was left untouched.
    NoDestination,
    /// The ledger was empty; nothing was sent.
    Empty,
    /// One message with this many entries was delivered.
    Sent(usize),
    /// Delivery failed. The drained entries are gone: they are not restored
    /// into the ledger, so that day's list is lost.
    SendFailed(usize),
}

/// Runs one flush cycle. The caller owns the recurring trigger; the date is
/// injected so the state machine can be driven without wall-clock time.
pub async fn flush_once<M, D>(
    ledger: &Ledger,
    messenger: &M,
    destination: &D,
    today: NaiveDate,
) -> FlushOutcome
where
    M: Messenger,
    D: DestinationStore,
{
    let chat = match destination.load() {
        Ok(Some(chat)) => chat,
        Ok(None) => {
            info!("no destination chat set, skipping flush");
            return FlushOutcome::NoDestination;
        }
        Err(e) => {
            error!("failed to read destination chat: {e}");
            return FlushOutcome::NoDestination;
        }
    };

    let entries = ledger.drain();
    if entries.is_empty() {
        info!("ledger empty, nothing to flush");
        return FlushOutcome::Empty;
    }

    let text = format_ledger(&entries, today);
    match messenger.send_message(chat, &text).await {
        Ok(()) => {
            info!(chat, entries = entries.len(), "daily ledger sent");
            FlushOutcome::Sent(entries.len())
        }
        Err(e) => {
            // The drained entries are not put back; a failed send loses the
            // day's ledger.
            error!(chat, entries = entries.len(), "daily ledger send failed: {e}");
            FlushOutcome::SendFailed(entries.len())
        }
    }
}

/// Next instant the flush should fire: today at `at` if that is still ahead,
/// otherwise tomorrow. A DST gap that swallows the fire time skips to the
/// next valid day; an ambiguous time takes the earlier instant.
pub fn next_fire<Tz: TimeZone>(now: DateTime<Tz>, at: NaiveTime) -> DateTime<Tz> {
    let tz = now.timezone();
    let mut day = now.date_naive();
    if now.time() >= at {
        day = day.succ_opt().unwrap_or(day);
    }
    loop {
        match tz.from_local_datetime(&day.and_time(at)) {
            chrono::LocalResult::Single(t) => return t,
            chrono::LocalResult::Ambiguous(earlier, _) => return earlier,
            chrono::LocalResult::None => match day.succ_opt() {
                Some(next) => day = next,
                None => return now,
            },
        }
    }
}
