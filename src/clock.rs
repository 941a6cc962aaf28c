use chrono::{Datelike, Local, NaiveDateTime, Timelike};

const MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Long Brazilian Portuguese date with hours and minutes, e.g.
/// `17 de outubro de 2026 às 09:05`.
pub fn format_clock(at: NaiveDateTime) -> String {
    format!(
        "{} de {} de {} às {:02}:{:02}",
        at.day(),
        MONTHS[at.month0() as usize],
        at.year(),
        at.hour(),
        at.minute()
    )
}

pub fn now_label() -> String {
    format_clock(Local::now().naive_local())
}
