use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::action::Action;

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    MoveUp,
    MoveDown,
    Open,
    Submit,
    Backspace,
    InputChar(char),
    Interrupt,
    Resize(u16, u16),
}

impl TuiEvent {
    /// The core action for this event. Resize is handled by the TUI first
    /// because it needs fresh geometry, so it has no direct mapping.
    pub fn into_action(self) -> Option<Action> {
        match self {
            TuiEvent::MoveUp => Some(Action::MoveUp),
            TuiEvent::MoveDown => Some(Action::MoveDown),
            TuiEvent::Open => Some(Action::OpenSelection),
            TuiEvent::Submit => Some(Action::SubmitLine),
            TuiEvent::Backspace => Some(Action::DeleteChar),
            TuiEvent::InputChar(c) => Some(Action::InsertChar(c)),
            TuiEvent::Interrupt => Some(Action::Interrupt),
            TuiEvent::Resize(..) => None,
        }
    }
}

/// Block until the terminal reports an event we care about.
pub fn read_event() -> std::io::Result<TuiEvent> {
    loop {
        if let Some(event) = map_event(event::read()?) {
            return Ok(event);
        }
    }
}

pub fn map_event(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => map_key(key_event),
        Event::Resize(width, height) => Some(TuiEvent::Resize(width, height)),
        _ => None,
    }
}

fn map_key(key_event: KeyEvent) -> Option<TuiEvent> {
    // Terminals with keyboard enhancement also report releases
    if key_event.kind == KeyEventKind::Release {
        return None;
    }
    log::debug!(
        "Key event: {:?} with modifiers {:?}",
        key_event.code,
        key_event.modifiers
    );
    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::Interrupt),
        // Ctrl+H is what some terminals send for the erase character
        (KeyModifiers::CONTROL, KeyCode::Char('h')) => Some(TuiEvent::Backspace),
        (m, KeyCode::Char(_)) if m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => None,
        (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
        (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
        (_, KeyCode::Enter) => Some(TuiEvent::Submit),
        (_, KeyCode::Esc) => Some(TuiEvent::Interrupt),
        (_, KeyCode::Up) => Some(TuiEvent::MoveUp),
        (_, KeyCode::Down) => Some(TuiEvent::MoveDown),
        (_, KeyCode::Right) => Some(TuiEvent::Open),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(map_event(key(KeyCode::Up)), Some(TuiEvent::MoveUp));
        assert_eq!(map_event(key(KeyCode::Down)), Some(TuiEvent::MoveDown));
        assert_eq!(map_event(key(KeyCode::Right)), Some(TuiEvent::Open));
        assert_eq!(map_event(key(KeyCode::Left)), None);
    }

    #[test]
    fn test_editing_keys() {
        assert_eq!(map_event(key(KeyCode::Enter)), Some(TuiEvent::Submit));
        assert_eq!(map_event(key(KeyCode::Backspace)), Some(TuiEvent::Backspace));
        assert_eq!(
            map_event(key(KeyCode::Char('x'))),
            Some(TuiEvent::InputChar('x'))
        );
        let shifted = Event::Key(KeyEvent::new(KeyCode::Char('X'), KeyModifiers::SHIFT));
        assert_eq!(map_event(shifted), Some(TuiEvent::InputChar('X')));
    }

    #[test]
    fn test_interrupt_keys() {
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(map_event(ctrl_c), Some(TuiEvent::Interrupt));
        assert_eq!(map_event(key(KeyCode::Esc)), Some(TuiEvent::Interrupt));
    }

    #[test]
    fn test_ctrl_h_is_backspace_other_ctrl_ignored() {
        let ctrl_h = Event::Key(KeyEvent::new(KeyCode::Char('h'), KeyModifiers::CONTROL));
        assert_eq!(map_event(ctrl_h), Some(TuiEvent::Backspace));
        let ctrl_x = Event::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL));
        assert_eq!(map_event(ctrl_x), None);
    }

    #[test]
    fn test_release_events_ignored() {
        let mut release = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(map_event(Event::Key(release)), None);
    }

    #[test]
    fn test_resize_event() {
        assert_eq!(
            map_event(Event::Resize(120, 40)),
            Some(TuiEvent::Resize(120, 40))
        );
        assert_eq!(TuiEvent::Resize(1, 1).into_action(), None);
    }

    #[test]
    fn test_into_action() {
        assert_eq!(TuiEvent::Open.into_action(), Some(Action::OpenSelection));
        assert_eq!(
            TuiEvent::InputChar('q').into_action(),
            Some(Action::InsertChar('q'))
        );
        assert_eq!(TuiEvent::Interrupt.into_action(), Some(Action::Interrupt));
    }
}
