use crate::rotation::{Direction, Speed};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Step applied by the arrow keys
pub const FINE_STEP: f32 = 1.0;
/// Step applied by page up / page down
pub const COARSE_STEP: f32 = 10.0;

/// Spinner fields on the control panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    EyeX,
    EyeY,
    EyeZ,
    LightX,
    LightY,
    LightZ,
}

impl Field {
    const ORDER: [Field; 6] = [
        Field::EyeX,
        Field::EyeY,
        Field::EyeZ,
        Field::LightX,
        Field::LightY,
        Field::LightZ,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|&f| f == self).unwrap_or(0)
    }

    pub fn next(self) -> Field {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn previous(self) -> Field {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::EyeX => "eye x",
            Field::EyeY => "eye y",
            Field::EyeZ => "eye z",
            Field::LightX => "light x",
            Field::LightY => "light y",
            Field::LightZ => "light z",
        }
    }
}

/// A user action from the control panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Control {
    SetSpeed(Speed),
    SetDirection(Direction),
    SelectNext,
    SelectPrevious,
    Nudge(f32),
    ToggleDebug,
    ToggleWireframe,
    Reset,
    Quit,
}

/// Maps a key press to a control, ignoring releases and unbound keys
pub fn control_for_key(key: KeyEvent) -> Option<Control> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Control::Quit);
    }
    let control = match key.code {
        KeyCode::Char('0') => Control::SetSpeed(Speed::Off),
        KeyCode::Char('1') => Control::SetSpeed(Speed::One),
        KeyCode::Char('2') => Control::SetSpeed(Speed::Two),
        KeyCode::Char('3') => Control::SetSpeed(Speed::Three),
        KeyCode::Char('4') => Control::SetSpeed(Speed::Four),
        KeyCode::Char('c') | KeyCode::Char('C') => Control::SetDirection(Direction::Clockwise),
        KeyCode::Char('v') | KeyCode::Char('V') => {
            Control::SetDirection(Direction::CounterClockwise)
        }
        KeyCode::Tab => Control::SelectNext,
        KeyCode::BackTab => Control::SelectPrevious,
        KeyCode::Up => Control::Nudge(FINE_STEP),
        KeyCode::Down => Control::Nudge(-FINE_STEP),
        KeyCode::PageUp => Control::Nudge(COARSE_STEP),
        KeyCode::PageDown => Control::Nudge(-COARSE_STEP),
        KeyCode::Char('d') | KeyCode::Char('D') => Control::ToggleDebug,
        KeyCode::Char('w') | KeyCode::Char('W') => Control::ToggleWireframe,
        KeyCode::Char('r') | KeyCode::Char('R') => Control::Reset,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Control::Quit,
        _ => return None,
    };
    Some(control)
}
