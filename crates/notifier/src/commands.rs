use workshop_core::schedule::WorkshopSchedule;

use crate::messages;

/// Bot commands understood by the webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Help,
    Info,
    Price,
    /// Any other text, including unknown slash commands
    Unknown,
}

impl BotCommand {
    /// Parses the first word of a message. `/info@workshop_bot` reads as `/info`.
    pub fn parse(text: &str) -> Self {
        let first = text.split_whitespace().next().unwrap_or_default();
        let command = first.split('@').next().unwrap_or_default();

        match command {
            "/start" => Self::Start,
            "/help" => Self::Help,
            "/info" => Self::Info,
            "/price" => Self::Price,
            _ => Self::Unknown,
        }
    }

    pub fn reply(self, schedule: &WorkshopSchedule) -> String {
        match self {
            Self::Start => messages::welcome(schedule),
            Self::Help => messages::help(),
            Self::Info => messages::info(schedule),
            Self::Price => messages::price(schedule),
            Self::Unknown => messages::fallback(),
        }
    }
}
