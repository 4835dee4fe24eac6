//! Rendering the daily ledger message.

use chrono::{Datelike, NaiveDate};

use crate::model::{PaymentEntry, RECEIVER_PLACEHOLDER};

/// Reply used by the show-ledger command when nothing is pending. The flush
/// path never formats an empty ledger at all.
pub const EMPTY_LEDGER_REPLY: &str = "Выплат на сегодня нет.";

/// Genitive month names, as the date reads in the header phrase.
const MONTHS_GENITIVE: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

/// Formats the ledger message: a dated header plus one line per entry in
/// insertion order. Pure and deterministic given its inputs.
pub fn format_ledger(entries: &[PaymentEntry], as_of: NaiveDate) -> String {
    let month = MONTHS_GENITIVE[as_of.month0() as usize];
    let mut out = format!("Выплаты за {} {}:", as_of.day(), month);
    for entry in entries {
        out.push('\n');
        out.push_str(&format!(
            "{}₽ {} {} {} {}",
            entry.amount,
            entry.name,
            entry.phone,
            entry.bank,
            receiver_suffix(&entry.receiver)
        ));
    }
    out
}

/// Trailing receiver annotation for one ledger line.
///
/// Upstream data sometimes already embeds the label, so a receiver text that
/// starts with the word "получатель" is wrapped verbatim instead of getting
/// the label a second time.
fn receiver_suffix(receiver: &str) -> String {
    let receiver = receiver.trim();
    if receiver.is_empty() || receiver == RECEIVER_PLACEHOLDER {
        return String::new();
    }
    if receiver.to_lowercase().starts_with("получатель") {
        format!("({receiver})")
    } else {
        format!("(получатель {receiver})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(amount: &str, name: &str, phone: &str, bank: &str, receiver: &str) -> PaymentEntry {
        PaymentEntry {
            amount: amount.into(),
            name: name.into(),
            phone: phone.into(),
            bank: bank.into(),
            receiver: receiver.into(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn placeholder_receiver_leaves_trailing_space() {
        let entries = [entry("500", "Ivan Petrov", "89110000000", "BankX", "—")];
        let text = format_ledger(&entries, date(2024, 9, 5));
        // The empty suffix keeps the separator space at the end of the line.
        assert_eq!(
            text,
            "Выплаты за 5 сентября:\n500₽ Ivan Petrov 89110000000 BankX "
        );
    }

    #[test]
    fn header_uses_genitive_month() {
        assert_eq!(format_ledger(&[], date(2024, 9, 21)), "Выплаты за 21 сентября:");
        assert_eq!(format_ledger(&[], date(2025, 1, 1)), "Выплаты за 1 января:");
        assert_eq!(format_ledger(&[], date(2025, 12, 31)), "Выплаты за 31 декабря:");
    }

    #[test]
    fn receiver_gets_wrapped_with_label() {
        let entries = [entry("500", "Иванов Петр", "89112223344", "Тинькофф", "Anna")];
        insta::assert_snapshot!(format_ledger(&entries, date(2024, 3, 8)), @r"
        Выплаты за 8 марта:
        500₽ Иванов Петр 89112223344 Тинькофф (получатель Anna)
        ");
    }

    #[test]
    fn embedded_label_is_wrapped_verbatim() {
        assert_eq!(receiver_suffix("получатель: Anna"), "(получатель: Anna)");
        assert_eq!(receiver_suffix("Получатель Ирина"), "(Получатель Ирина)");
        assert_eq!(receiver_suffix("Anna"), "(получатель Anna)");
        assert_eq!(receiver_suffix("—"), "");
        assert_eq!(receiver_suffix("  "), "");
    }

    #[test]
    fn entries_stay_in_insertion_order() {
        let entries = [
            entry("1200", "Петров", "89110000001", "Сбер", "Оля"),
            entry("300", "Сидоров", "89110000002", "ВТБ", "Мария"),
            entry("5 000", "Иванов", "89110000003", "Альфа", "получатель жена"),
        ];
        insta::assert_snapshot!(format_ledger(&entries, date(2024, 7, 14)), @r"
        Выплаты за 14 июля:
        1200₽ Петров 89110000001 Сбер (получатель Оля)
        300₽ Сидоров 89110000002 ВТБ (получатель Мария)
        5 000₽ Иванов 89110000003 Альфа (получатель жена)
        ");
    }
}
