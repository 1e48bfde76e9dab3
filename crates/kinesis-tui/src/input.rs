use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::App;
use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    PageDown,
    PageUp,
    JumpToTop,
    JumpToBottom,
    PendingG, // First 'g' press, waiting for second 'g'
    Rescramble,
    /// Pointer at a terminal cell
    PointerMove { column: u16, row: u16 },
    PointerLeave,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    // Crossterm reports Shift+g as 'G' with SHIFT on most terminals, but not all
    let modifiers = match key.code {
        KeyCode::Char(c) if c.is_ascii_uppercase() => key.modifiers | KeyModifiers::SHIFT,
        _ => key.modifiers,
    };
    let binding = KeyBinding::new(key.code, modifiers);

    if keymap.is_g_prefix(&binding) {
        return if app.pending_key == Some('g') {
            keymap.get_pending_g_action().cloned().unwrap_or(Action::None)
        } else {
            Action::PendingG
        };
    }

    keymap.get(&binding).cloned().unwrap_or(Action::None)
}

/// Map mouse input onto page actions
pub fn handle_mouse_event(mouse: MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::ScrollDown => Action::ScrollDown,
        MouseEventKind::ScrollUp => Action::ScrollUp,
        MouseEventKind::Moved | MouseEventKind::Drag(_) | MouseEventKind::Down(_) => {
            Action::PointerMove {
                column: mouse.column,
                row: mouse.row,
            }
        }
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, MouseButton};
    use kinesis_core::MotionConfig;
    use std::sync::Arc;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn mouse(kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column: 12,
            row: 7,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn app() -> App {
        App::new(Arc::new(MotionConfig::default()), 120, 40).unwrap()
    }

    #[test]
    fn test_scroll_keys() {
        let app = app();
        let keymap = Keymap::default();
        assert_eq!(
            handle_key_event(key(KeyCode::Char('j'), KeyModifiers::NONE), &app, &keymap),
            Action::ScrollDown
        );
        assert_eq!(
            handle_key_event(key(KeyCode::PageUp, KeyModifiers::NONE), &app, &keymap),
            Action::PageUp
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('G'), KeyModifiers::NONE), &app, &keymap),
            Action::JumpToBottom
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('x'), KeyModifiers::NONE), &app, &keymap),
            Action::None
        );
    }

    #[test]
    fn test_gg_sequence() {
        let mut app = app();
        let keymap = Keymap::default();
        let g = key(KeyCode::Char('g'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(g, &app, &keymap), Action::PendingG);
        app.pending_key = Some('g');
        assert_eq!(handle_key_event(g, &app, &keymap), Action::JumpToTop);
    }

    #[test]
    fn test_mouse_events() {
        assert_eq!(handle_mouse_event(mouse(MouseEventKind::ScrollDown)), Action::ScrollDown);
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Moved)),
            Action::PointerMove { column: 12, row: 7 }
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left))),
            Action::PointerMove { column: 12, row: 7 }
        );
        assert_eq!(handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left))), Action::None);
    }
}
