//! Clickable on-screen controls
//!
//! The pad is laid out from the area the renderer gives it, and the same
//! layout is used to hit-test mouse clicks, so what is drawn is what reacts.

use ratatui::layout::{Constraint, Direction as LayoutDirection, Flex, Layout, Rect};

use crate::game::{Action, Direction};

const BUTTON_WIDTH: u16 = 9;

/// A single button on the control pad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadButton {
    Left,
    Up,
    Down,
    Right,
    Start,
    Pause,
    Reset,
}

impl PadButton {
    /// Buttons in the order they appear, left to right
    pub const ALL: [PadButton; 7] = [
        PadButton::Left,
        PadButton::Up,
        PadButton::Down,
        PadButton::Right,
        PadButton::Start,
        PadButton::Pause,
        PadButton::Reset,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PadButton::Left => "←",
            PadButton::Up => "↑",
            PadButton::Down => "↓",
            PadButton::Right => "→",
            PadButton::Start => "Start",
            PadButton::Pause => "Pause",
            PadButton::Reset => "Reset",
        }
    }

    pub fn action(&self) -> Action {
        match self {
            PadButton::Left => Action::Turn(Direction::Left),
            PadButton::Up => Action::Turn(Direction::Up),
            PadButton::Down => Action::Turn(Direction::Down),
            PadButton::Right => Action::Turn(Direction::Right),
            PadButton::Start => Action::Start,
            PadButton::Pause => Action::TogglePause,
            PadButton::Reset => Action::Reset,
        }
    }
}

/// Screen placement of every pad button
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlPad {
    buttons: Vec<(PadButton, Rect)>,
}

impl ControlPad {
    /// Lay the buttons out in one centered row inside `area`
    pub fn layout(area: Rect) -> Self {
        let constraints = PadButton::ALL.map(|_| Constraint::Length(BUTTON_WIDTH));
        let cells = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints(constraints)
            .flex(Flex::Center)
            .spacing(1)
            .split(area);

        let buttons = PadButton::ALL
            .iter()
            .zip(cells.iter())
            .map(|(button, rect)| (*button, *rect))
            .collect();

        Self { buttons }
    }

    pub fn buttons(&self) -> &[(PadButton, Rect)] {
        &self.buttons
    }

    /// The button under the given terminal cell, if any
    pub fn hit(&self, column: u16, row: u16) -> Option<PadButton> {
        self.buttons
            .iter()
            .find(|(_, rect)| {
                column >= rect.x
                    && column < rect.x.saturating_add(rect.width)
                    && row >= rect.y
                    && row < rect.y.saturating_add(rect.height)
            })
            .map(|(button, _)| *button)
    }
}
