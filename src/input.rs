//! Keyboard handling for the viewer.
//!
//! The only input the simulation reacts to is a request to stop: closing the
//! window, or pressing Escape or Backspace. Requests are collected while
//! events are polled and honoured between steps.

use std::collections::HashSet;
use std::fmt;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Keys that end the simulation.
pub const QUIT_KEYS: [KeyCode; 2] = [KeyCode::Escape, KeyCode::Backspace];

/// Why the viewer is stopping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuitReason {
    WindowClosed,
    Key(KeyCode),
}

impl fmt::Display for QuitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuitReason::WindowClosed => write!(f, "window closed"),
            QuitReason::Key(key) => write!(f, "{:?} pressed", key),
        }
    }
}

/// Keyboard state and pending quit request for the viewer window.
#[derive(Debug, Default)]
pub struct Input {
    down: HashSet<KeyCode>,
    quit: Option<QuitReason>,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` is down right now.
    pub fn is_down(&self, key: KeyCode) -> bool {
        self.down.contains(&key)
    }

    /// The first quit request seen, if any. Once set it stays set.
    pub fn quit_requested(&self) -> Option<QuitReason> {
        self.quit
    }

    pub(crate) fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.request_quit(QuitReason::WindowClosed),
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    self.key_changed(key, event.state);
                }
            }
            WindowEvent::Focused(false) => self.down.clear(),
            _ => {}
        }
    }

    fn key_changed(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                // Auto-repeat arrives as more presses while the key is down.
                let fresh = self.down.insert(key);
                if fresh && QUIT_KEYS.contains(&key) {
                    self.request_quit(QuitReason::Key(key));
                }
            }
            ElementState::Released => {
                self.down.remove(&key);
            }
        }
    }

    fn request_quit(&mut self, reason: QuitReason) {
        self.quit.get_or_insert(reason);
    }
}
