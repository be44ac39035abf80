use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::Message;
use crate::app::model::{Field, Model};
use crate::editor::Direction;

/// Translate a terminal event into a message for the current model.
pub fn message_for_event(event: Event, model: &Model) -> Option<Message> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => message_for_key(key, model),
        Event::Paste(text) if model.restore_prompt.is_none() => Some(Message::Paste(text)),
        Event::Resize(w, h) => Some(Message::Resize(w, h)),
        _ => None,
    }
}

pub fn message_for_key(key: KeyEvent, model: &Model) -> Option<Message> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && matches!(key.code, KeyCode::Char('c' | 'q')) {
        return Some(Message::Quit);
    }

    // The restore prompt blocks editing until it is answered.
    if model.restore_prompt.is_some() {
        return match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(Message::ConfirmRestore),
            KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Message::DeclineRestore),
            _ => None,
        };
    }

    if model.help_visible {
        return Some(Message::HideHelp);
    }

    if ctrl {
        return match key.code {
            KeyCode::Char('s') => Some(Message::Save),
            KeyCode::Char('p') => Some(Message::TogglePreview),
            KeyCode::Char('o') => Some(Message::ToggleSettings),
            KeyCode::Char('t') => Some(Message::TogglePublished),
            KeyCode::Char('b') => Some(Message::NextBlog),
            KeyCode::Home => Some(Message::MoveToStart),
            KeyCode::End => Some(Message::MoveToEnd),
            _ => None,
        };
    }

    let page = model.content_height().max(1);
    match key.code {
        KeyCode::F(1) => return Some(Message::ToggleHelp),
        KeyCode::F(2) => return Some(Message::ToggleSettings),
        KeyCode::Tab => return Some(Message::FocusNext),
        KeyCode::BackTab => return Some(Message::FocusPrev),
        KeyCode::PageUp => return Some(Message::ScrollUp(page)),
        KeyCode::PageDown => return Some(Message::ScrollDown(page)),
        _ => {}
    }

    if model.preview_mode && model.focus == Field::Body {
        return match key.code {
            KeyCode::Up => Some(Message::ScrollUp(1)),
            KeyCode::Down => Some(Message::ScrollDown(1)),
            KeyCode::Esc => Some(Message::TogglePreview),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc if model.settings_visible => Some(Message::ToggleSettings),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => {
            Some(Message::InsertChar(c))
        }
        KeyCode::Enter => Some(Message::Enter),
        KeyCode::Backspace if model.focus == Field::TagInput && model.tag_input.is_empty() => {
            Some(Message::RemoveLastTag)
        }
        KeyCode::Backspace => Some(Message::Backspace),
        KeyCode::Delete => Some(Message::Delete),
        KeyCode::Left => Some(Message::MoveCursor(Direction::Left)),
        KeyCode::Right => Some(Message::MoveCursor(Direction::Right)),
        KeyCode::Up => Some(Message::MoveCursor(Direction::Up)),
        KeyCode::Down => Some(Message::MoveCursor(Direction::Down)),
        KeyCode::Home => Some(Message::MoveHome),
        KeyCode::End => Some(Message::MoveEnd),
        _ => None,
    }
}
