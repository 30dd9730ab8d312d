//! Keyboard handling for Payform fields.
//!
//! Hosts hand every key press for a focused field to `handle_key_event`.
//! The return value says whether the field consumed it; unconsumed keys
//! (Tab past the last segment, clipboard shortcuts) belong to the host.

use crate::card_field::CardField;
use crate::one_time_code::OneTimeCodeField;
use payform_foundation::{KeyCode, KeyEvent};

pub(crate) fn handle_card_key_event(field: &CardField, event: &KeyEvent) -> bool {
    match event.key_code {
        // Segment navigation
        KeyCode::Tab if event.modifiers.shift => field.focus_previous(),
        KeyCode::Tab => field.focus_next(),

        // Typing and paste
        _ if event.is_text_input() => {
            if field.focused().is_none() {
                return false;
            }
            field.insert_text(&event.text);
            true
        }

        // Backspace, retreating across segments when empty
        KeyCode::Backspace => {
            if field.focused().is_none() {
                return false;
            }
            field.delete_backward();
            true
        }

        _ => false,
    }
}

pub(crate) fn handle_one_time_code_key_event(field: &mut OneTimeCodeField, event: &KeyEvent) -> bool {
    match event.key_code {
        // Select all (Ctrl+A)
        KeyCode::A if event.modifiers.command_or_ctrl() => {
            field.select_all();
            true
        }

        _ if event.is_text_input() => {
            field.insert_text(&event.text);
            true
        }

        KeyCode::Backspace => {
            field.delete_backward();
            true
        }

        KeyCode::ArrowLeft => {
            field.move_caret(-1);
            true
        }
        KeyCode::ArrowRight => {
            field.move_caret(1);
            true
        }
        KeyCode::Home => {
            field.move_caret_to_start();
            true
        }
        KeyCode::End => {
            field.move_caret_to_end();
            true
        }

        _ => false,
    }
}
