use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::pad::ControlPad;
use crate::game::{Action, Direction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    GameAction(Action),
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => turn(Direction::Up),
            KeyCode::Down => turn(Direction::Down),
            KeyCode::Left => turn(Direction::Left),
            KeyCode::Right => turn(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => turn(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => turn(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => turn(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => turn(Direction::Right),

            // Lifecycle
            KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => {
                KeyAction::GameAction(Action::TogglePause)
            }
            KeyCode::Enter => KeyAction::GameAction(Action::Start),
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::GameAction(Action::Reset),

            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }

    /// Translate a left click on the control pad into the button's action
    pub fn handle_mouse_event(&self, mouse: MouseEvent, pad: &ControlPad) -> KeyAction {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return KeyAction::None;
        }

        match pad.hit(mouse.column, mouse.row) {
            Some(button) => KeyAction::GameAction(button.action()),
            None => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn turn(direction: Direction) -> KeyAction {
    KeyAction::GameAction(Action::Turn(direction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PadButton;
    use ratatui::layout::Rect;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_arrow_keys() {
        let handler = InputHandler::new();

        assert_eq!(handler.handle_key_event(press(KeyCode::Up)), turn(Direction::Up));
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Down)),
            turn(Direction::Down)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Left)),
            turn(Direction::Left)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Right)),
            turn(Direction::Right)
        );
    }

    #[test]
    fn test_wasd_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('w'))),
            turn(Direction::Up)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('a'))),
            turn(Direction::Left)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('s'))),
            turn(Direction::Down)
        );
        assert_eq!(
            handler.handle_key_event(KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT)),
            turn(Direction::Right)
        );
    }

    #[test]
    fn test_lifecycle_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char(' '))),
            KeyAction::GameAction(Action::TogglePause)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('p'))),
            KeyAction::GameAction(Action::TogglePause)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Enter)),
            KeyAction::GameAction(Action::Start)
        );
        assert_eq!(
            handler.handle_key_event(KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT)),
            KeyAction::GameAction(Action::Reset)
        );
    }

    #[test]
    fn test_quit_keys() {
        let handler = InputHandler::new();

        assert_eq!(handler.handle_key_event(press(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(handler.handle_key_event(press(KeyCode::Esc)), KeyAction::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_unknown_key() {
        let handler = InputHandler::new();
        assert_eq!(handler.handle_key_event(press(KeyCode::Char('x'))), KeyAction::None);
    }

    #[test]
    fn test_click_on_pad_button() {
        let handler = InputHandler::new();
        let pad = ControlPad::layout(Rect::new(0, 30, 80, 3));
        let (_, up) = pad
            .buttons()
            .iter()
            .find(|(button, _)| *button == PadButton::Up)
            .copied()
            .unwrap();

        let action = handler.handle_mouse_event(
            click(MouseEventKind::Down(MouseButton::Left), up.x + 1, up.y + 1),
            &pad,
        );
        assert_eq!(action, turn(Direction::Up));
    }

    #[test]
    fn test_click_on_start_button() {
        let handler = InputHandler::new();
        let pad = ControlPad::layout(Rect::new(0, 30, 80, 3));
        let (_, start) = pad
            .buttons()
            .iter()
            .find(|(button, _)| *button == PadButton::Start)
            .copied()
            .unwrap();

        let action = handler.handle_mouse_event(
            click(MouseEventKind::Down(MouseButton::Left), start.x, start.y),
            &pad,
        );
        assert_eq!(action, KeyAction::GameAction(Action::Start));
    }

    #[test]
    fn test_click_outside_pad_or_other_button_is_ignored() {
        let handler = InputHandler::new();
        let pad = ControlPad::layout(Rect::new(0, 30, 80, 3));
        let (_, rect) = pad.buttons()[0];

        assert_eq!(
            handler.handle_mouse_event(click(MouseEventKind::Down(MouseButton::Left), 0, 0), &pad),
            KeyAction::None
        );
        assert_eq!(
            handler.handle_mouse_event(
                click(MouseEventKind::Down(MouseButton::Right), rect.x, rect.y),
                &pad
            ),
            KeyAction::None
        );
        assert_eq!(
            handler.handle_mouse_event(
                click(MouseEventKind::Up(MouseButton::Left), rect.x, rect.y),
                &pad
            ),
            KeyAction::None
        );
    }
}
