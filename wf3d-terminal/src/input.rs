//! Translates crossterm events into per-tick input snapshots
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use wf3d_core::InputState;

/// Shell-level requests that are not camera motion
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Quit,
    ToggleCameraMode,
    SetCameraMode(bool),
    AdjustFisheye(f64),
}

/// Fisheye slider change per key press
pub const FISHEYE_STEP: f64 = 10.0;

/// Collects events between ticks.
///
/// Terminals report key presses but rarely key releases, so every press
/// counts as held for the next tick only and is cleared by [`InputCollector::take`].
#[derive(Debug, Default)]
pub struct InputCollector {
    state: InputState,
    last_mouse: Option<(u16, u16)>,
}

impl InputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key(&mut self, event: KeyEvent) -> Option<Action> {
        if event.kind == KeyEventKind::Release {
            return None;
        }

        if event.modifiers.contains(KeyModifiers::CONTROL) {
            self.state.slow = true;
        }

        match event.code {
            KeyCode::Esc => return Some(Action::Quit),
            KeyCode::Tab => return Some(Action::ToggleCameraMode),
            KeyCode::Char(' ') => self.state.up = true,
            KeyCode::Char(c) => {
                if c.is_ascii_uppercase() || event.modifiers.contains(KeyModifiers::SHIFT) {
                    self.state.fast = true;
                }
                match c.to_ascii_lowercase() {
                    'q' if !event.modifiers.contains(KeyModifiers::CONTROL) => return Some(Action::Quit),
                    'w' => self.state.forward = true,
                    'a' => self.state.left = true,
                    's' => self.state.back = true,
                    'd' => self.state.right = true,
                    '+' | '=' => return Some(Action::AdjustFisheye(FISHEYE_STEP)),
                    '-' | '_' => return Some(Action::AdjustFisheye(-FISHEYE_STEP)),
                    _ => {}
                }
            }
            KeyCode::Up => self.state.forward = true,
            KeyCode::Down => self.state.back = true,
            KeyCode::Left => self.state.left = true,
            KeyCode::Right => self.state.right = true,
            _ => {}
        }
        None
    }

    /// Mouse motion feeds look deltas only while camera-mode is on; the
    /// middle button holds camera-mode like a drag.
    pub fn handle_mouse(&mut self, event: MouseEvent, camera_mode: bool) -> Option<Action> {
        let position = (event.column, event.row);
        let action = match event.kind {
            MouseEventKind::Down(MouseButton::Middle) => Some(Action::SetCameraMode(true)),
            MouseEventKind::Up(MouseButton::Middle) => Some(Action::SetCameraMode(false)),
            MouseEventKind::Moved | MouseEventKind::Drag(_) if camera_mode => {
                if let Some((last_x, last_y)) = self.last_mouse {
                    self.state.mouse.dx += position.0 as f64 - last_x as f64;
                    self.state.mouse.dy += position.1 as f64 - last_y as f64;
                }
                None
            }
            _ => None,
        };
        self.last_mouse = Some(position);
        action
    }

    pub fn peek(&self) -> &InputState {
        &self.state
    }

    /// Returns the snapshot for this tick and starts a fresh one.
    pub fn take(&mut self) -> InputState {
        std::mem::take(&mut self.state)
    }
}
