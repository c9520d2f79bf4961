//! Key-to-action mapping for the TUI.
//!
//! Each action takes a list of keys such as `"j"`, `"Down"`, `"Ctrl+c"` or
//! `"Shift+Tab"`. Names are case-insensitive; single characters are not.

use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use crate::tui::event::Action;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    pub quit: Vec<String>,
    pub move_up: Vec<String>,
    pub move_down: Vec<String>,
    pub next_pane: Vec<String>,
    pub prev_pane: Vec<String>,
    pub focus_input: Vec<String>,
    pub select: Vec<String>,
    pub close: Vec<String>,
    pub open_in_browser: Vec<String>,
}

fn keys(list: &[&str]) -> Vec<String> {
    list.iter().map(|k| k.to_string()).collect()
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            quit: keys(&["q", "Ctrl+c"]),
            move_up: keys(&["k", "Up"]),
            move_down: keys(&["j", "Down"]),
            next_pane: keys(&["Tab"]),
            prev_pane: keys(&["BackTab", "Shift+Tab"]),
            focus_input: keys(&["a", "/"]),
            select: keys(&["Enter"]),
            close: keys(&["Esc"]),
            open_in_browser: keys(&["o"]),
        }
    }
}

impl KeybindingConfig {
    fn table(&self) -> [(&[String], Action); 9] {
        [
            (self.quit.as_slice(), Action::Quit),
            (self.move_up.as_slice(), Action::MoveUp),
            (self.move_down.as_slice(), Action::MoveDown),
            (self.next_pane.as_slice(), Action::NextPane),
            (self.prev_pane.as_slice(), Action::PrevPane),
            (self.focus_input.as_slice(), Action::FocusInput),
            (self.select.as_slice(), Action::Select),
            (self.close.as_slice(), Action::Close),
            (self.open_in_browser.as_slice(), Action::OpenInBrowser),
        ]
    }

    /// First action whose bindings match `key`; unparsable bindings never match.
    pub fn get_action(&self, key: &KeyEvent) -> Action {
        self.table()
            .into_iter()
            .find(|(bindings, _)| {
                bindings
                    .iter()
                    .filter_map(|b| b.parse::<KeyBinding>().ok())
                    .any(|b| b.matches(key))
            })
            .map_or(Action::None, |(_, action)| action)
    }

    /// Configured keys that do not parse, with the reason.
    pub fn invalid_bindings(&self) -> Vec<(String, String)> {
        self.table()
            .into_iter()
            .flat_map(|(bindings, _)| bindings.iter())
            .filter_map(|b| b.parse::<KeyBinding>().err().map(|e| (b.clone(), e)))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn matches(&self, key: &KeyEvent) -> bool {
        // Terminals add SHIFT to uppercase letters and BackTab.
        self.code == key.code
            && (key.modifiers == self.modifiers
                || key.modifiers.difference(KeyModifiers::SHIFT) == self.modifiers)
    }
}

const NAMED_KEYS: &[(&str, KeyCode)] = &[
    ("enter", KeyCode::Enter),
    ("return", KeyCode::Enter),
    ("tab", KeyCode::Tab),
    ("backtab", KeyCode::BackTab),
    ("backspace", KeyCode::Backspace),
    ("delete", KeyCode::Delete),
    ("del", KeyCode::Delete),
    ("home", KeyCode::Home),
    ("end", KeyCode::End),
    ("pageup", KeyCode::PageUp),
    ("pagedown", KeyCode::PageDown),
    ("up", KeyCode::Up),
    ("down", KeyCode::Down),
    ("left", KeyCode::Left),
    ("right", KeyCode::Right),
    ("esc", KeyCode::Esc),
    ("escape", KeyCode::Esc),
    ("space", KeyCode::Char(' ')),
];

impl FromStr for KeyBinding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (prefix, key) = match s.rsplit_once('+') {
            Some((prefix, key)) if !key.is_empty() => (Some(prefix), key),
            _ => (None, s),
        };

        let mut modifiers = KeyModifiers::NONE;
        for part in prefix.into_iter().flat_map(|p| p.split('+')) {
            modifiers |= match part.trim().to_ascii_lowercase().as_str() {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "shift" => KeyModifiers::SHIFT,
                "alt" => KeyModifiers::ALT,
                other => return Err(format!("Unknown modifier: {}", other)),
            };
        }

        Ok(KeyBinding {
            code: parse_key_code(key)?,
            modifiers,
        })
    }
}

fn parse_key_code(s: &str) -> Result<KeyCode, String> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    let lower = s.to_ascii_lowercase();
    if let Some((_, code)) = NAMED_KEYS.iter().find(|(name, _)| *name == lower) {
        return Ok(*code);
    }

    lower
        .strip_prefix('f')
        .and_then(|n| n.parse::<u8>().ok())
        .filter(|n| (1..=12).contains(n))
        .map(KeyCode::F)
        .ok_or_else(|| format!("Unknown key: {}", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_parse_bindings() {
        let cases = [
            ("j", KeyCode::Char('j'), KeyModifiers::NONE),
            ("R", KeyCode::Char('R'), KeyModifiers::NONE),
            ("/", KeyCode::Char('/'), KeyModifiers::NONE),
            ("+", KeyCode::Char('+'), KeyModifiers::NONE),
            ("ф", KeyCode::Char('ф'), KeyModifiers::NONE),
            ("enter", KeyCode::Enter, KeyModifiers::NONE),
            ("Esc", KeyCode::Esc, KeyModifiers::NONE),
            ("F12", KeyCode::F(12), KeyModifiers::NONE),
            ("Ctrl+c", KeyCode::Char('c'), KeyModifiers::CONTROL),
            ("Shift+Tab", KeyCode::Tab, KeyModifiers::SHIFT),
            (
                "Ctrl+Shift+a",
                KeyCode::Char('a'),
                KeyModifiers::CONTROL.union(KeyModifiers::SHIFT),
            ),
        ];

        for (raw, code, modifiers) in cases {
            assert_eq!(
                raw.parse::<KeyBinding>(),
                Ok(KeyBinding { code, modifiers }),
                "binding {raw}"
            );
        }
    }

    #[test]
    fn test_parse_errors() {
        assert!("Hyper+a".parse::<KeyBinding>().is_err());
        assert!("F13".parse::<KeyBinding>().is_err());
        assert!("Launch".parse::<KeyBinding>().is_err());
    }

    #[test]
    fn test_default_actions() {
        let config = KeybindingConfig::default();

        assert_eq!(
            config.get_action(&key(KeyCode::Char('j'), KeyModifiers::NONE)),
            Action::MoveDown
        );
        assert_eq!(
            config.get_action(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
        assert_eq!(
            config.get_action(&key(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Action::PrevPane
        );
        assert_eq!(
            config.get_action(&key(KeyCode::Char('/'), KeyModifiers::NONE)),
            Action::FocusInput
        );
        assert_eq!(
            config.get_action(&key(KeyCode::Esc, KeyModifiers::NONE)),
            Action::Close
        );
        assert_eq!(
            config.get_action(&key(KeyCode::Char('x'), KeyModifiers::NONE)),
            Action::None
        );
    }

    #[test]
    fn test_ctrl_binding_needs_ctrl() {
        let binding: KeyBinding = "Ctrl+c".parse().unwrap();
        assert!(binding.matches(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!binding.matches(&key(KeyCode::Char('c'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_custom_bindings_and_invalid_report() {
        let config: KeybindingConfig =
            toml::from_str("quit = [\"x\", \"Hyper+q\"]\n").expect("partial keybindings");

        assert_eq!(
            config.get_action(&key(KeyCode::Char('x'), KeyModifiers::NONE)),
            Action::Quit
        );
        assert_eq!(
            config.get_action(&key(KeyCode::Char('q'), KeyModifiers::NONE)),
            Action::None
        );
        assert_eq!(
            config.get_action(&key(KeyCode::Char('j'), KeyModifiers::NONE)),
            Action::MoveDown
        );

        let invalid = config.invalid_bindings();
        assert_eq!(invalid.len(), 1);
        assert_eq!(invalid[0].0, "Hyper+q");
    }
}
