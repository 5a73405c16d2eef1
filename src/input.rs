//! Window input translated into widget commands.
//!
//! The window feeds raw `winit` events through [`Input`], which keeps the
//! cursor position and turns clicks and key presses into [`Command`]s.
//!
//! | Input | Command |
//! |-------|---------|
//! | Left click | [`Command::Burst`] at the cursor |
//! | `G` | [`Command::Greet`] |
//! | `M` | [`Command::ToggleMusic`] |
//! | `C` | [`Command::Celebrate`] |
//! | `L` | [`Command::CopyLink`] |
//! | `1`-`4` | [`Command::Share`] |
//! | `Esc` | [`Command::Quit`] |

use crate::share::Platform;
use glam::Vec2;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

/// Keys the widget reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    G,
    M,
    C,
    L,
    Key1,
    Key2,
    Key3,
    Key4,
    Escape,
    Other,
}

impl From<WinitKeyCode> for KeyCode {
    fn from(key: WinitKeyCode) -> Self {
        match key {
            WinitKeyCode::KeyG => KeyCode::G,
            WinitKeyCode::KeyM => KeyCode::M,
            WinitKeyCode::KeyC => KeyCode::C,
            WinitKeyCode::KeyL => KeyCode::L,
            WinitKeyCode::Digit1 => KeyCode::Key1,
            WinitKeyCode::Digit2 => KeyCode::Key2,
            WinitKeyCode::Digit3 => KeyCode::Key3,
            WinitKeyCode::Digit4 => KeyCode::Key4,
            WinitKeyCode::Escape => KeyCode::Escape,
            _ => KeyCode::Other,
        }
    }
}

/// Something the user asked for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Fire a fireworks burst at a pixel position.
    Burst(Vec2),
    /// Show a random greeting with confetti.
    Greet,
    /// Flip the music toggle.
    ToggleMusic,
    /// Start the confetti shower now.
    Celebrate,
    /// Copy the page link.
    CopyLink,
    /// Share to a platform.
    Share(Platform),
    /// Close the window.
    Quit,
}

impl Command {
    /// Command bound to a key, if any.
    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::G => Some(Command::Greet),
            KeyCode::M => Some(Command::ToggleMusic),
            KeyCode::C => Some(Command::Celebrate),
            KeyCode::L => Some(Command::CopyLink),
            KeyCode::Key1 => Some(Command::Share(Platform::Twitter)),
            KeyCode::Key2 => Some(Command::Share(Platform::Instagram)),
            KeyCode::Key3 => Some(Command::Share(Platform::WhatsApp)),
            KeyCode::Key4 => Some(Command::Share(Platform::LinkedIn)),
            KeyCode::Escape => Some(Command::Quit),
            KeyCode::Other => None,
        }
    }
}

/// Cursor tracking and event translation.
#[derive(Debug, Default)]
pub struct Input {
    cursor: Vec2,
    hovering: bool,
}

impl Input {
    /// Cursor at the origin, outside the window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known cursor position in physical pixels.
    #[inline]
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Whether the cursor is inside the window.
    #[inline]
    pub fn hovering(&self) -> bool {
        self.hovering
    }

    /// Move the cursor. Split out from [`handle_event`](Self::handle_event) for testing.
    pub fn cursor_moved(&mut self, position: Vec2) {
        self.cursor = position;
        self.hovering = true;
    }

    /// A left click at the current cursor.
    pub fn click(&self) -> Command {
        Command::Burst(self.cursor)
    }

    /// Process a window event, returning a command if it maps to one.
    pub fn handle_event(&mut self, event: &WindowEvent) -> Option<Command> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(Vec2::new(position.x as f32, position.y as f32));
                None
            }
            WindowEvent::CursorLeft { .. } => {
                self.hovering = false;
                None
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => Some(self.click()),
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed && !event.repeat =>
            {
                match event.physical_key {
                    PhysicalKey::Code(code) => Command::from_key(code.into()),
                    PhysicalKey::Unidentified(_) => None,
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Command::from_key(WinitKeyCode::KeyG.into()), Some(Command::Greet));
        assert_eq!(
            Command::from_key(WinitKeyCode::Digit3.into()),
            Some(Command::Share(Platform::WhatsApp))
        );
        assert_eq!(Command::from_key(WinitKeyCode::Escape.into()), Some(Command::Quit));
        assert_eq!(Command::from_key(WinitKeyCode::KeyZ.into()), None);
    }

    #[test]
    fn test_click_uses_last_cursor() {
        let mut input = Input::new();
        input.cursor_moved(Vec2::new(120.0, 45.5));
        assert!(input.hovering());
        assert_eq!(input.click(), Command::Burst(Vec2::new(120.0, 45.5)));
    }
}
