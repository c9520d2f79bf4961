//! Color configuration for the TUI.
//!
//! Values go through ratatui's own parser: names such as `"Cyan"`,
//! `"dark gray"` or `"LightRed"`, hex `"#RRGGBB"`, or a 256-color index.

use ratatui::style::Color;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub active_border: Color,
    pub inactive_border: Color,
    pub selection_bg_active: Color,
    pub selection_fg_active: Color,
    pub selection_bg_inactive: Color,
    pub selection_fg_inactive: Color,
    /// Posts already opened in the detail view.
    pub viewed_post: Color,
    pub unviewed_post: Color,
    pub feedback_success: Color,
    pub feedback_error: Color,
    pub metadata_date: Color,
    pub metadata_link: Color,
    pub status_fg: Color,
    pub status_bg: Color,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            active_border: Color::Cyan,
            inactive_border: Color::DarkGray,
            selection_bg_active: Color::Cyan,
            selection_fg_active: Color::Black,
            selection_bg_inactive: Color::DarkGray,
            selection_fg_inactive: Color::White,
            viewed_post: Color::DarkGray,
            unviewed_post: Color::White,
            feedback_success: Color::Green,
            feedback_error: Color::Red,
            metadata_date: Color::Yellow,
            metadata_link: Color::Blue,
            status_fg: Color::White,
            status_bg: Color::DarkGray,
        }
    }
}
