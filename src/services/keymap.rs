//! Keyboard mapping for the calculator's input boundary.
//!
//! This module translates raw key events coming from whatever surface hosts
//! the calculator into typed [`InputEvent`]s, and provides the ordered
//! shortcut-reference table rendered by the transient shortcuts overlay.

use crate::models::{Operator, ScientificFunction};
use indexmap::IndexMap;

/// A typed calculator input event.
///
/// Every interaction - key press or button press - is expressed as one of
/// these before it reaches the dispatcher, so the core never sees raw keys.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Digit(char),
    Decimal,
    /// Insert a constant value (pi, e) as the current entry.
    Constant(f64),
    Operation(Operator),
    Function(ScientificFunction),
    Calculate,
    ClearEntry,
    ClearAll,
    Backspace,
    ToggleScientific,
    ToggleTheme,
    ToggleHistory,
    ToggleShortcuts,
    ClearHistory,
    /// Reuse a past result as the current entry.
    UseHistoryResult(String),
}

/// A raw key press at the input boundary.
///
/// `key` follows the usual event naming: single characters for printable
/// keys, names like `"Enter"`, `"Escape"` and `"Backspace"` for the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: String,
    pub ctrl: bool,
}

impl KeyEvent {
    pub fn plain(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: false,
        }
    }

    pub fn with_ctrl(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: true,
        }
    }
}

/// Map a key press to its calculator input event, if it has one.
///
/// The bindings: digits and `.` enter the operand; `+ - * / %` select an
/// operation; `Enter`/`=` calculate; `Escape`/`c` clear; `Backspace` erases;
/// `s`, `t`, `h` toggle the scientific panel, theme and history panel; and
/// `Ctrl+/` toggles the shortcuts overlay. Modified keys other than `Ctrl+/`
/// are not part of the contract and map to nothing.
pub fn map_key(event: &KeyEvent) -> Option<InputEvent> {
    if event.ctrl {
        return match event.key.as_str() {
            "/" => Some(InputEvent::ToggleShortcuts),
            _ => None,
        };
    }

    if let Some(digit) = single_char(&event.key).filter(char::is_ascii_digit) {
        return Some(InputEvent::Digit(digit));
    }

    let mapped = match event.key.as_str() {
        "." => InputEvent::Decimal,
        "+" => InputEvent::Operation(Operator::Add),
        "-" => InputEvent::Operation(Operator::Subtract),
        "*" => InputEvent::Operation(Operator::Multiply),
        "/" => InputEvent::Operation(Operator::Divide),
        "%" => InputEvent::Operation(Operator::Modulo),
        "Enter" | "=" => InputEvent::Calculate,
        "Escape" | "c" | "C" => InputEvent::ClearAll,
        "Backspace" => InputEvent::Backspace,
        "s" | "S" => InputEvent::ToggleScientific,
        "t" | "T" => InputEvent::ToggleTheme,
        "h" | "H" => InputEvent::ToggleHistory,
        _ => return None,
    };

    Some(mapped)
}

/// The shortcut table shown by the transient overlay, in display order.
pub fn shortcut_reference() -> IndexMap<&'static str, &'static str> {
    IndexMap::from([
        ("Numbers & Operators", "0-9, +, -, *, /, %"),
        ("Calculate", "Enter or ="),
        ("Clear All", "Escape or C"),
        ("Backspace", "Backspace"),
        ("Scientific Mode", "S"),
        ("Theme Toggle", "T"),
        ("History", "H"),
        ("Close Overlay", "Ctrl + /"),
    ])
}

fn single_char(key: &str) -> Option<char> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
