//! Message templates sent by the bot. All texts use Telegram HTML markup.

use workshop_core::dates::format_date_ru;
use workshop_core::models::booking::{Booking, Gender};
use workshop_core::schedule::WorkshopSchedule;

pub const STUDIO_NAME: &str = "Студия керамики «Майолика»";
pub const STUDIO_ADDRESS: &str = "Токсово, Привокзальная пл. 1 (здание Токсовской бани)";
pub const STUDIO_PHONE: &str = "+7 (921) 755-92-88";

/// Escapes the characters Telegram's HTML parse mode treats as markup.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// `1400` → `1 400`
pub fn format_rub(amount: u32) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

fn hours_word(hours: u32) -> &'static str {
    match (hours % 10, hours % 100) {
        (1, h) if h != 11 => "час",
        (2..=4, h) if !(12..=14).contains(&h) => "часа",
        _ => "часов",
    }
}

fn opening_times(schedule: &WorkshopSchedule) -> String {
    format!(
        "с {}:00 до {}:00",
        schedule.opening_hour,
        schedule.closing_hour()
    )
}

/// Message sent to operators for every new booking.
pub fn booking_notification(booking: &Booking) -> String {
    let age = booking
        .age
        .map(|a| a.to_string())
        .unwrap_or_else(|| "—".to_string());
    let gender = match booking.gender {
        Some(Gender::Male) => "Мальчик",
        Some(Gender::Female) => "Девочка",
        None => "—",
    };
    let phone = if booking.parent_phone.is_empty() {
        "—".to_string()
    } else {
        escape_html(&booking.parent_phone)
    };

    format!(
        "🆕 <b>Новая запись на мастер-класс!</b>\n\n\
         👤 <b>Имя:</b> {name}\n\
         🎂 <b>Возраст:</b> {age}\n\
         🧒 <b>Пол:</b> {gender}\n\
         📞 <b>Телефон родителей:</b> {phone}\n\
         📅 <b>Дата:</b> {date}\n\
         ⏰ <b>Время:</b> {start} - {end}\n\
         ⏱ <b>Длительность:</b> {hours} ч.\n\
         💰 <b>Стоимость:</b> {price} ₽",
        name = escape_html(&booking.full_name()),
        date = format_date_ru(booking.booking_date),
        start = booking.start_time,
        end = booking.end_time(),
        hours = booking.hours,
        price = format_rub(booking.total_price),
    )
}

pub fn welcome(schedule: &WorkshopSchedule) -> String {
    format!(
        "🤲 <b>Добро пожаловать в {STUDIO_NAME}!</b>\n\n\
         Здесь вы можете:\n\
         • Записаться на мастер-класс\n\
         • Получать новости и акции\n\n\
         📍 <b>Адрес:</b> {STUDIO_ADDRESS}\n\
         📞 <b>Телефон:</b> {STUDIO_PHONE}\n\
         ⏰ <b>Мастер-классы:</b> Каждую субботу {}\n\n\
         Нажмите кнопку меню ниже, чтобы записаться! 👇",
        opening_times(schedule)
    )
}

pub fn help() -> String {
    format!(
        "🤲 <b>{STUDIO_NAME}</b>\n\n\
         <b>Доступные команды:</b>\n\
         /start — Начать\n\
         /help — Помощь\n\
         /info — О мастерской\n\
         /price — Цены\n\n\
         Чтобы записаться на мастер-класс, нажмите кнопку меню!"
    )
}

pub fn info(schedule: &WorkshopSchedule) -> String {
    format!(
        "🤲 <b>О нашей мастерской</b>\n\n\
         {STUDIO_NAME} — это уютное место, где дети и взрослые учатся создавать уникальные изделия из глины.\n\n\
         📍 <b>Адрес:</b> {STUDIO_ADDRESS}\n\n\
         📞 <b>Телефон:</b> {STUDIO_PHONE}\n\n\
         ⏰ <b>Режим работы:</b>\n\
         Мастер-классы проводятся каждую субботу {}\n\n\
         🎨 Подходит для детей от 5 лет!",
        opening_times(schedule)
    )
}

pub fn price(schedule: &WorkshopSchedule) -> String {
    let lines: Vec<String> = (1..=schedule.slot_count)
        .map(|h| format!("• {} {} — {} ₽", h, hours_word(h), format_rub(schedule.price_for(h))))
        .collect();

    format!(
        "💰 <b>Стоимость мастер-классов</b>\n\n\
         {}\n\n\
         ✅ Все материалы включены в стоимость!\n\n\
         Записывайтесь через кнопку меню 👇",
        lines.join("\n")
    )
}

pub fn fallback() -> String {
    "Чтобы записаться на мастер-класс, нажмите кнопку меню внизу экрана 👇\n\n\
     Или используйте команды:\n\
     /info — О мастерской\n\
     /price — Цены"
        .to_string()
}
