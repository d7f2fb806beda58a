// crates/nationality-core/src/selector/keys.rs
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Keyboard input understood by the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectorKey {
    Up,
    Down,
    Home,
    End,
    Enter,
    Escape,
    Backspace,
    /// A printable character typed into the search box.
    Char(char),
    /// Type-ahead: move focus to the next name starting with this letter
    /// without touching the search text.
    Letter(char),
}

impl FromStr for SelectorKey {
    type Err = String;

    /// Parses the key names used by the browser (`KeyboardEvent.key`) and the
    /// CLI: `ArrowUp`/`up`, `ArrowDown`/`down`, `Home`, `End`, `Enter`,
    /// `Escape`/`esc`, `Backspace`, `alt+<c>` for type-ahead, or a single
    /// character.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.to_ascii_lowercase().as_str() {
            "arrowup" | "up" => Self::Up,
            "arrowdown" | "down" => Self::Down,
            "home" => Self::Home,
            "end" => Self::End,
            "enter" | "return" => Self::Enter,
            "escape" | "esc" => Self::Escape,
            "backspace" => Self::Backspace,
            "space" => Self::Char(' '),
            _ => {
                if let Some(rest) = s.strip_prefix("alt+").or_else(|| s.strip_prefix("Alt+")) {
                    return single_char(rest).map(Self::Letter);
                }
                return single_char(s).map(Self::Char);
            }
        };
        Ok(key)
    }
}

fn single_char(s: &str) -> Result<char, String> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_control() => Ok(c),
        _ => Err(format!("unrecognized key: {s:?}")),
    }
}
