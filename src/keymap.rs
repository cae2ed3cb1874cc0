//! Keyboard shortcuts for the composer and the assistant query input.
//!
//! - Composer: Ctrl/Cmd+Enter sends.
//! - Query input: Ctrl/Cmd+Enter or plain Enter submits; Shift+Enter does not.

use std::fmt;
use std::str::FromStr;

#[cfg(test)]
#[path = "keymap_test.rs"]
mod keymap_test;

/// Input field that received the key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    Composer,
    Query,
}

impl FromStr for InputTarget {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "composer" => Ok(Self::Composer),
            "query" => Ok(Self::Query),
            other => Err(KeyParseError::UnknownTarget(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Char(char),
}

/// A key plus modifiers. `meta` is Cmd on macOS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    pub key: Key,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl KeyChord {
    #[must_use]
    pub const fn plain(key: Key) -> Self {
        Self { key, ctrl: false, meta: false, shift: false }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyParseError {
    #[error("empty key chord")]
    Empty,
    #[error("unknown key token: {0}")]
    UnknownToken(String),
    #[error("unknown input target: {0}")]
    UnknownTarget(String),
}

impl FromStr for KeyChord {
    type Err = KeyParseError;

    /// Parse `"ctrl+enter"`, `"cmd+enter"`, `"shift+enter"`, `"enter"`, `"a"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens: Vec<&str> = s.split('+').map(str::trim).collect();
        let Some(last) = tokens.pop().filter(|t| !t.is_empty()) else {
            return Err(KeyParseError::Empty);
        };
        let key = match last.to_ascii_lowercase().as_str() {
            "enter" | "return" => Key::Enter,
            single if single.chars().count() == 1 => Key::Char(single.chars().next().unwrap_or_default()),
            _ => return Err(KeyParseError::UnknownToken(last.to_owned())),
        };
        let mut chord = Self::plain(key);
        for token in tokens {
            match token.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => chord.ctrl = true,
                "cmd" | "meta" | "super" => chord.meta = true,
                "shift" => chord.shift = true,
                _ => return Err(KeyParseError::UnknownToken(token.to_owned())),
            }
        }
        Ok(chord)
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            f.write_str("ctrl+")?;
        }
        if self.meta {
            f.write_str("cmd+")?;
        }
        if self.shift {
            f.write_str("shift+")?;
        }
        match self.key {
            Key::Enter => f.write_str("enter"),
            Key::Char(c) => write!(f, "{c}"),
        }
    }
}

/// Action a shortcut maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    SendMessage,
    SubmitQuery,
}

/// Resolve a key press in `target` to an action, if it is a shortcut.
#[must_use]
pub fn resolve(target: InputTarget, chord: KeyChord) -> Option<ShortcutAction> {
    if chord.key != Key::Enter {
        return None;
    }
    let command = chord.ctrl || chord.meta;
    match target {
        InputTarget::Composer if command => Some(ShortcutAction::SendMessage),
        InputTarget::Query if command || !chord.shift => Some(ShortcutAction::SubmitQuery),
        _ => None,
    }
}
