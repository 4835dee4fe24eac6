//! Transport-agnostic command dispatch: takes the chat id and message text,
//! returns the reply text. Sending the reply is the transport's job.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::ResolveError;
use crate::format::{EMPTY_LEDGER_REPLY, format_ledger};
use crate::ledger::Ledger;
use crate::model::{ChatId, NewWorker, PaymentEntry, RECEIVER_PLACEHOLDER};
use crate::resolve;
use crate::store::{DestinationStore, RecordStore};

const START_REPLY: &str = "Привет! Отправьте данные в формате:\n\n\
    ФИО Иванов Петр\n\
    Телефон 89112223344\n\
    Банк Тинькофф\n\
    Получатель Иванова Ирина\n\n\
    Команды:\n\
    /pay <кто> <сумма> — записать выплату\n\
    /list — список выплат за сегодня\n\
    /setchat — присылать ежедневную сводку в этот чат";

const REGISTER_MISSING_FIELDS: &str =
    "Ошибка: обязательно укажите:\nФИО ...\nТелефон ...";

const PAY_USAGE: &str = "Формат: /pay <кто> <сумма> [<кто> <сумма> ...]";

const STORE_UNAVAILABLE: &str = "Таблица недоступна, попробуйте позже.";

const UNKNOWN_COMMAND: &str = "Неизвестная команда. Отправьте /start для справки.";

/// Handles one inbound message and returns the reply text.
///
/// `today` is the date the show-ledger reply is stamped with; the caller
/// computes it in the bot's timezone so it matches the scheduled flush.
pub async fn handle<S, D>(
    store: &S,
    ledger: &Ledger,
    destination: &D,
    chat: ChatId,
    today: NaiveDate,
    text: &str,
) -> String
where
    S: RecordStore,
    D: DestinationStore,
{
    let text = text.trim();
    if let Some(rest) = text.strip_prefix('/') {
        let mut tokens = rest.split_whitespace();
        let command = tokens.next().unwrap_or_default();
        // Group chats address commands as /pay@BotName.
        let command = command.split('@').next().unwrap_or(command);
        match command {
            "start" => START_REPLY.to_owned(),
            "pay" => pay(store, ledger, tokens.collect()).await,
            "list" => show_ledger(ledger, today),
            "setchat" => set_destination(destination, chat),
            _ => UNKNOWN_COMMAND.to_owned(),
        }
    } else {
        register(store, text).await
    }
}

/// Registration: free text of "Ключ значение" lines, one field per line.
async fn register<S: RecordStore>(store: &S, text: &str) -> String {
    let mut full_name = String::new();
    let mut phone = String::new();
    let mut bank = String::new();
    let mut receiver = String::new();

    for line in text.lines() {
        let Some((key, value)) = line.trim().split_once(' ') else {
            continue;
        };
        let value = value.trim();
        match key.to_lowercase().as_str() {
            "фио" => full_name = value.to_owned(),
            "телефон" => phone = value.to_owned(),
            "банк" => bank = value.to_owned(),
            "получатель" => receiver = value.to_owned(),
            _ => {}
        }
    }

    if full_name.is_empty() || phone.is_empty() {
        return REGISTER_MISSING_FIELDS.to_owned();
    }
    if receiver.is_empty() {
        receiver = RECEIVER_PLACEHOLDER.to_owned();
    }

    let worker = NewWorker {
        full_name,
        phone,
        bank,
        receiver,
    };
    match store.append_worker(&worker).await {
        Ok(row) => {
            info!(row, name = %worker.full_name, "worker registered");
            format!("Вы успешно добавлены!\nВаш ID: {row}")
        }
        Err(e) => {
            warn!("worker registration failed: {e}");
            STORE_UNAVAILABLE.to_owned()
        }
    }
}

/// Add payments: alternating (reference, amount) pairs. An odd argument list
/// rejects the whole request; an unknown reference is reported but does not
/// abort the rest of the batch.
async fn pay<S: RecordStore>(store: &S, ledger: &Ledger, args: Vec<&str>) -> String {
    if args.is_empty() || args.len() % 2 != 0 {
        return PAY_USAGE.to_owned();
    }

    let mut added = 0usize;
    let mut problems = Vec::new();
    for pair in args.chunks(2) {
        let (reference, amount) = (pair[0], pair[1]);
        match resolve::lookup(store, reference).await {
            Ok(worker) => {
                ledger.append(PaymentEntry::for_worker(amount, &worker));
                added += 1;
            }
            Err(ResolveError::NotFound(_)) => {
                problems.push(format!("Не найдено: {reference}"));
            }
            Err(ResolveError::Store(e)) => {
                // Entries appended so far stay; the rest of the batch is
                // abandoned with a user-visible failure.
                warn!("record store read failed during /pay: {e}");
                return STORE_UNAVAILABLE.to_owned();
            }
        }
    }

    let mut reply = format!("Записано выплат: {added}");
    for problem in problems {
        reply.push('\n');
        reply.push_str(&problem);
    }
    reply
}

fn show_ledger(ledger: &Ledger, today: NaiveDate) -> String {
    let entries = ledger.snapshot();
    if entries.is_empty() {
        EMPTY_LEDGER_REPLY.to_owned()
    } else {
        format_ledger(&entries, today)
    }
}

fn set_destination<D: DestinationStore>(destination: &D, chat: ChatId) -> String {
    match destination.save(chat) {
        Ok(()) => {
            info!(chat, "destination chat updated");
            "Готово, ежедневная сводка будет приходить в этот чат.".to_owned()
        }
        Err(e) => {
            warn!(chat, "failed to persist destination chat: {e}");
            STORE_UNAVAILABLE.to_owned()
        }
    }
}
