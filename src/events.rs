use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};

use crate::app::Action;

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Translate a terminal event into an [`Action`], if it means anything.
pub fn map_event(event: Event) -> Option<Action> {
    match event {
        Event::Key(key) => map_key_event(key),
        Event::Mouse(mouse) => map_mouse_event(mouse),
        Event::Resize(width, height) => Some(Action::Resize { width, height }),
        _ => None,
    }
}

/// Map a key press
pub fn map_key_event(key: KeyEvent) -> Option<Action> {
    // Windows reports releases too
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let action = match key.code {
        // Quit
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,

        // Mode switch
        KeyCode::Esc => Action::ToggleFocus,

        // Column scroll or sheet paging, depending on mode
        KeyCode::Left | KeyCode::Char('h') => Action::MoveLeft,
        KeyCode::Right | KeyCode::Char('l') => Action::MoveRight,

        KeyCode::Enter => Action::Select,

        // Everything else goes to the table and pager
        _ => Action::Key(key),
    };
    Some(action)
}

/// Map mouse events; the wheel moves the row cursor
pub fn map_mouse_event(mouse: MouseEvent) -> Option<Action> {
    let code = match mouse.kind {
        MouseEventKind::ScrollUp => KeyCode::Up,
        MouseEventKind::ScrollDown => KeyCode::Down,
        _ => return None,
    };
    Some(Action::Key(KeyEvent::new(code, KeyModifiers::NONE)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseButton};

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(map_event(press(KeyCode::Esc)), Some(Action::ToggleFocus));
        assert_eq!(map_event(press(KeyCode::Left)), Some(Action::MoveLeft));
        assert_eq!(map_event(press(KeyCode::Char('h'))), Some(Action::MoveLeft));
        assert_eq!(map_event(press(KeyCode::Right)), Some(Action::MoveRight));
        assert_eq!(map_event(press(KeyCode::Char('l'))), Some(Action::MoveRight));
        assert_eq!(map_event(press(KeyCode::Enter)), Some(Action::Select));
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(map_event(press(KeyCode::Char('q'))), Some(Action::Quit));
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(map_event(ctrl_c), Some(Action::Quit));
    }

    #[test]
    fn test_other_keys_pass_through() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        assert_eq!(map_event(Event::Key(key)), Some(Action::Key(key)));

        let page_down = KeyEvent::new(KeyCode::PageDown, KeyModifiers::NONE);
        assert_eq!(map_event(Event::Key(page_down)), Some(Action::Key(page_down)));
    }

    #[test]
    fn test_key_release_is_ignored() {
        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Char('q'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert_eq!(map_event(Event::Key(release)), None);
    }

    #[test]
    fn test_resize_event() {
        assert_eq!(
            map_event(Event::Resize(120, 40)),
            Some(Action::Resize {
                width: 120,
                height: 40
            })
        );
    }

    #[test]
    fn test_mouse_wheel_moves_cursor() {
        assert_eq!(
            map_event(mouse(MouseEventKind::ScrollDown)),
            Some(Action::Key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE)))
        );
        assert_eq!(
            map_event(mouse(MouseEventKind::ScrollUp)),
            Some(Action::Key(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE)))
        );
        assert_eq!(map_event(mouse(MouseEventKind::Down(MouseButton::Left))), None);
    }

    #[test]
    fn test_focus_events_are_ignored() {
        assert_eq!(map_event(Event::FocusGained), None);
    }
}
