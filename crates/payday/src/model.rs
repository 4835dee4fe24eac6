/// Telegram chat identifier.
pub type ChatId = i64;

/// Placeholder stored in the receiver column when none was given.
pub const RECEIVER_PLACEHOLDER: &str = "—";

/// One worker row from the record store.
///
/// `row` is the 1-based position in the store's append-only sequence. Rows
/// are never deleted, so a row number is stable once assigned, but it is
/// always derived from position when reading, never cached between lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerRecord {
    pub row: u32,
    pub full_name: String,
    pub phone: String,
    pub bank: String,
    pub receiver: String,
}

impl WorkerRecord {
    /// Builds a record from a positional cell row `[id, name, phone, bank, receiver]`.
    ///
    /// The stored id cell is ignored; identity comes from `row`. Missing or
    /// blank trailing cells are tolerated, an absent receiver becomes the
    /// placeholder.
    pub fn from_cells(row: u32, cells: &[String]) -> Self {
        let cell = |i: usize| {
            cells
                .get(i)
                .map(|s| s.trim().to_owned())
                .unwrap_or_default()
        };
        let receiver = match cell(4) {
            r if r.is_empty() => RECEIVER_PLACEHOLDER.to_owned(),
            r => r,
        };
        WorkerRecord {
            row,
            full_name: cell(1),
            phone: cell(2),
            bank: cell(3),
            receiver,
        }
    }
}

/// Registration payload; the store assigns the row number on append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorker {
    pub full_name: String,
    pub phone: String,
    pub bank: String,
    pub receiver: String,
}

impl NewWorker {
    /// Positional cells for an append, with `row` as the id column.
    pub fn to_cells(&self, row: u32) -> Vec<String> {
        vec![
            row.to_string(),
            self.full_name.clone(),
            self.phone.clone(),
            self.bank.clone(),
            self.receiver.clone(),
        ]
    }
}

/// One pending payout line. The amount stays verbatim free-form text; the
/// source format is not guaranteed to parse as a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentEntry {
    pub amount: String,
    pub name: String,
    pub phone: String,
    pub bank: String,
    pub receiver: String,
}

impl PaymentEntry {
    pub fn for_worker(amount: impl Into<String>, worker: &WorkerRecord) -> Self {
        PaymentEntry {
            amount: amount.into(),
            name: worker.full_name.clone(),
            phone: worker.phone.clone(),
            bank: worker.bank.clone(),
            receiver: worker.receiver.clone(),
        }
    }
}
