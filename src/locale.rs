//! User-facing strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKey {
    Required,
    InvalidUrl,
    Exists,
    InvalidRss,
    Network,
    Unknown,
    Added,
    Feeds,
    Posts,
    View,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ru,
}

impl Locale {
    pub fn text(self, key: MessageKey) -> &'static str {
        match self {
            Locale::En => match key {
                MessageKey::Required => "Should not be empty",
                MessageKey::InvalidUrl => "The link must be a valid URL",
                MessageKey::Exists => "RSS already exists",
                MessageKey::InvalidRss => "Resource does not contain valid RSS",
                MessageKey::Network => "Network error",
                MessageKey::Unknown => "Something went wrong, try again later",
                MessageKey::Added => "RSS loaded successfully",
                MessageKey::Feeds => "Feeds",
                MessageKey::Posts => "Posts",
                MessageKey::View => "View",
            },
            Locale::Ru => match key {
                MessageKey::Required => "Не должно быть пустым",
                MessageKey::InvalidUrl => "Ссылка должна быть валидным URL",
                MessageKey::Exists => "RSS уже существует",
                MessageKey::InvalidRss => "Ресурс не содержит валидный RSS",
                MessageKey::Network => "Ошибка сети",
                MessageKey::Unknown => "Что-то пошло не так, попробуйте позднее",
                MessageKey::Added => "RSS успешно загружен",
                MessageKey::Feeds => "Фиды",
                MessageKey::Posts => "Посты",
                MessageKey::View => "Просмотр",
            },
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Locale::En),
            "ru" | "russian" => Ok(Locale::Ru),
            other => Err(format!("Unknown locale: {}", other)),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => f.write_str("en"),
            Locale::Ru => f.write_str("ru"),
        }
    }
}
