//! Calendar helpers for the weekly Saturday workshop.

use chrono::{Datelike, Days, NaiveDate, Weekday};

const MONTHS_GENITIVE: [&str; 12] = [
    "января", "февраля", "марта", "апреля", "мая", "июня",
    "июля", "августа", "сентября", "октября", "ноября", "декабря",
];

/// The first Saturday strictly after `today`.
///
/// On a Saturday this returns the following week's Saturday.
pub fn next_saturday(today: NaiveDate) -> NaiveDate {
    let from_monday = today.weekday().num_days_from_monday();
    let saturday = Weekday::Sat.num_days_from_monday();
    let days = match (saturday + 7 - from_monday) % 7 {
        0 => 7,
        n => n,
    };
    today + Days::new(u64::from(days))
}

/// Sign-ups for the coming Saturday open on Friday.
pub fn booking_window_open(today: NaiveDate) -> bool {
    today.weekday() == Weekday::Fri
}

fn weekday_ru(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "понедельник",
        Weekday::Tue => "вторник",
        Weekday::Wed => "среда",
        Weekday::Thu => "четверг",
        Weekday::Fri => "пятница",
        Weekday::Sat => "суббота",
        Weekday::Sun => "воскресенье",
    }
}

/// Long Russian form, e.g. `суббота, 24 октября 2026 г.`
pub fn format_date_ru(date: NaiveDate) -> String {
    format!(
        "{}, {} {} {} г.",
        weekday_ru(date.weekday()),
        date.day(),
        MONTHS_GENITIVE[date.month0() as usize],
        date.year()
    )
}
