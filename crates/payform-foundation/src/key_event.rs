//! Keyboard input event types for Payform fields.
//!
//! Hosts translate platform key events into [`KeyEvent`]s and hand them to
//! the focused field. Only the keys a payment form reacts to are modelled;
//! everything else arrives as [`KeyCode::Other`] and is ignored.

use std::fmt;

/// Modifier keys state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Shift key is pressed.
    pub shift: bool,
    /// Control key is pressed.
    pub ctrl: bool,
    /// Alt key is pressed (Option on macOS).
    pub alt: bool,
    /// Meta/Super key is pressed (Cmd on macOS).
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers pressed.
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };

    /// Returns true if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }

    /// Returns true if Ctrl (or Cmd on macOS) is pressed.
    pub fn command_or_ctrl(&self) -> bool {
        #[cfg(target_os = "macos")]
        {
            self.meta
        }
        #[cfg(not(target_os = "macos"))]
        {
            self.ctrl
        }
    }
}

/// Keys a structured payment field distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A key producing printable text (digits, letters, punctuation).
    Character,
    Backspace,
    Delete,
    Tab,
    Enter,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    /// Letter A, used for select-all shortcuts.
    A,
    /// Any other key.
    Other,
}

/// A key press delivered to a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub key_code: KeyCode,
    /// The text produced by this key press (empty for non-character keys).
    pub text: String,
    /// Current state of modifier keys.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key_code: KeyCode, text: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key_code,
            text: text.into(),
            modifiers,
        }
    }

    /// A printable key press, or a paste when `text` holds several characters.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(KeyCode::Character, text, Modifiers::NONE)
    }

    /// A non-printing key press without modifiers.
    pub fn key(key_code: KeyCode) -> Self {
        Self::new(key_code, "", Modifiers::NONE)
    }

    /// A non-printing key press with modifiers.
    pub fn key_with_modifiers(key_code: KeyCode, modifiers: Modifiers) -> Self {
        Self::new(key_code, "", modifiers)
    }

    /// Returns true if this key produces printable text.
    pub fn has_text(&self) -> bool {
        !self.text.is_empty()
    }

    /// Returns true if the text should be inserted rather than treated as a shortcut.
    pub fn is_text_input(&self) -> bool {
        self.has_text() && !self.modifiers.command_or_ctrl()
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyEvent({:?}, text=\"{}\")", self.key_code, self.text)
    }
}
