//! Matching free-text references against the worker table.

use crate::error::ResolveError;
use crate::model::WorkerRecord;
use crate::store::RecordStore;

/// A reference is either a literal row number or a name fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RowQuery {
    Row(u32),
    Name(String),
}

impl RowQuery {
    fn parse(query: &str) -> Self {
        // All-digits means a literal row id. Existence is checked by the
        // later fetch, not here; out-of-range ids fail lazily.
        if !query.is_empty() && query.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(row) = query.parse() {
                return RowQuery::Row(row);
            }
        }
        RowQuery::Name(query.to_owned())
    }
}

/// Resolves a reference to a row number.
///
/// Numeric references are returned as-is without touching the store. Anything
/// else costs one full table read and returns the first row whose name
/// contains the query case-insensitively, so the lowest matching row number
/// always wins.
pub async fn resolve<S: RecordStore>(store: &S, query: &str) -> Result<u32, ResolveError> {
    match RowQuery::parse(query) {
        RowQuery::Row(row) => Ok(row),
        RowQuery::Name(name) => {
            let records = store.read_all().await?;
            find_by_name(&records, &name)
                .map(|record| record.row)
                .ok_or(ResolveError::NotFound(name))
        }
    }
}

/// Resolves a reference and fetches the record it denotes.
///
/// The numeric path reads the table only to index it; a row id past the end
/// of the table surfaces as `NotFound` here, which is the first point where
/// numeric references are validated at all.
pub async fn lookup<S: RecordStore>(store: &S, query: &str) -> Result<WorkerRecord, ResolveError> {
    match RowQuery::parse(query) {
        RowQuery::Row(row) => {
            let records = store.read_all().await?;
            row.checked_sub(1)
                .and_then(|i| records.into_iter().nth(i as usize))
                .ok_or_else(|| ResolveError::NotFound(query.to_owned()))
        }
        RowQuery::Name(name) => {
            let records = store.read_all().await?;
            find_by_name(&records, &name)
                .cloned()
                .ok_or(ResolveError::NotFound(name))
        }
    }
}

fn find_by_name<'a>(records: &'a [WorkerRecord], query: &str) -> Option<&'a WorkerRecord> {
    let needle = query.to_lowercase();
    records
        .iter()
        .find(|record| record.full_name.to_lowercase().contains(&needle))
}
