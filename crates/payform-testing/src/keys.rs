//! Key event builders for scripted input.

use payform_foundation::{KeyCode, KeyEvent, Modifiers};

/// One character key press per character of `text`.
pub fn key_events(text: &str) -> Vec<KeyEvent> {
    text.chars()
        .map(|ch| KeyEvent::text(ch.to_string()))
        .collect()
}

pub fn backspace() -> KeyEvent {
    KeyEvent::key(KeyCode::Backspace)
}

pub fn tab() -> KeyEvent {
    KeyEvent::key(KeyCode::Tab)
}

pub fn shift_tab() -> KeyEvent {
    KeyEvent::key_with_modifiers(KeyCode::Tab, Modifiers::SHIFT)
}

/// Ctrl+A, or Cmd+A on macOS.
pub fn select_all() -> KeyEvent {
    let modifiers = if cfg!(target_os = "macos") {
        Modifiers {
            meta: true,
            ..Modifiers::NONE
        }
    } else {
        Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        }
    };
    KeyEvent::key_with_modifiers(KeyCode::A, modifiers)
}
