use chrono::{NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use workshop_core::models::booking::{Booking, Gender};
use workshop_core::schedule::{Slot, WorkshopSchedule};
use workshop_notifier::commands::BotCommand;
use workshop_notifier::messages::{self, escape_html, format_rub};

#[rstest]
#[case("/start", BotCommand::Start)]
#[case("/help", BotCommand::Help)]
#[case("/info", BotCommand::Info)]
#[case("/price", BotCommand::Price)]
#[case("/info@majolica_bot", BotCommand::Info)]
#[case("  /price please", BotCommand::Price)]
#[case("/book", BotCommand::Unknown)]
#[case("hello", BotCommand::Unknown)]
#[case("", BotCommand::Unknown)]
fn test_parse_command(#[case] text: &str, #[case] expected: BotCommand) {
    assert_eq!(BotCommand::parse(text), expected);
}

#[test]
fn test_replies_follow_command() {
    let schedule = WorkshopSchedule::default();

    assert_eq!(BotCommand::Help.reply(&schedule), messages::help());
    assert_eq!(BotCommand::Unknown.reply(&schedule), messages::fallback());
    assert!(BotCommand::Start.reply(&schedule).contains("с 10:00 до 14:00"));
}

#[test]
fn test_price_lists_every_duration() {
    let price = messages::price(&WorkshopSchedule::default());

    assert!(price.contains("1 час — 700 ₽"));
    assert!(price.contains("2 часа — 1 400 ₽"));
    assert!(price.contains("3 часа — 2 100 ₽"));
    assert!(price.contains("4 часа — 2 800 ₽"));
}

#[test]
fn test_price_follows_schedule() {
    let schedule = WorkshopSchedule {
        opening_hour: 11,
        slot_count: 2,
        price_per_hour: 1000,
    };
    let price = messages::price(&schedule);

    assert!(price.contains("2 часа — 2 000 ₽"));
    assert!(!price.contains("3 часа"));
    assert!(messages::info(&schedule).contains("с 11:00 до 13:00"));
}

#[test]
fn test_format_rub() {
    assert_eq!(format_rub(0), "0");
    assert_eq!(format_rub(700), "700");
    assert_eq!(format_rub(2800), "2 800");
    assert_eq!(format_rub(1234567), "1 234 567");
}

#[test]
fn test_escape_html() {
    assert_eq!(escape_html("<b>Tom & Jerry</b>"), "&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;");
}

#[test]
fn test_booking_notification_contents() {
    let booking = Booking {
        id: "b1".to_string(),
        first_name: "Маша".to_string(),
        last_name: "<Иванова>".to_string(),
        age: Some(8),
        gender: Some(Gender::Female),
        parent_phone: "+7 921 000-00-00".to_string(),
        start_time: Slot::at(11),
        hours: 2,
        total_price: 1400,
        created_at: Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap(),
        booking_date: NaiveDate::from_ymd_opt(2026, 10, 24).unwrap(),
    };

    let text = messages::booking_notification(&booking);

    assert!(text.contains("Маша &lt;Иванова&gt;"));
    assert!(text.contains("11:00 - 13:00"));
    assert!(text.contains("Девочка"));
    assert!(text.contains("1 400 ₽"));
    assert!(text.contains("суббота, 24 октября 2026 г."));
}

#[test]
fn test_booking_notification_without_optional_fields() {
    let booking = Booking {
        id: "b2".to_string(),
        first_name: "Петя".to_string(),
        last_name: String::new(),
        age: None,
        gender: None,
        parent_phone: String::new(),
        start_time: Slot::at(10),
        hours: 1,
        total_price: 700,
        created_at: Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap(),
        booking_date: NaiveDate::from_ymd_opt(2026, 10, 24).unwrap(),
    };

    let text = messages::booking_notification(&booking);

    assert!(text.contains("<b>Имя:</b> Петя\n"));
    assert!(text.contains("<b>Возраст:</b> —"));
}
