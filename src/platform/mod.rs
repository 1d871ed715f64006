//! Platform input mapping
//!
//! Turns browser `KeyboardEvent.code` strings into simulation input. Held keys
//! are level-triggered; jump, special, pause and restart fire once per press.

use crate::sim::{GamePhase, TickInput};

/// A logical game action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Left,
    Right,
    Up,
    Down,
    Jump,
    Special,
    Pause,
    Restart,
}

impl Action {
    /// Bound key codes (`KeyboardEvent.code`)
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Action::Left),
            "ArrowRight" | "KeyD" => Some(Action::Right),
            "ArrowUp" | "KeyW" => Some(Action::Up),
            "ArrowDown" | "KeyS" => Some(Action::Down),
            "Space" => Some(Action::Jump),
            "KeyE" => Some(Action::Special),
            "Escape" | "KeyP" => Some(Action::Pause),
            "KeyR" => Some(Action::Restart),
            _ => None,
        }
    }
}

/// Keyboard state between animation frames
#[derive(Debug, Clone, Default)]
pub struct Keys {
    held: Vec<String>,
    input: TickInput,
}

impl Keys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key pressed. Returns true if the code is bound (caller should prevent default).
    pub fn key_down(&mut self, code: &str) -> bool {
        let Some(action) = Action::from_code(code) else {
            return false;
        };
        // Auto-repeat: only the first press counts as an edge
        let repeat = self.held.iter().any(|c| c == code);
        if !repeat {
            self.held.push(code.to_string());
        }

        match action {
            Action::Jump if !repeat => self.input.jump = true,
            Action::Special if !repeat => self.input.special = true,
            Action::Pause if !repeat => self.input.pause = true,
            Action::Restart if !repeat => self.input.restart = true,
            _ => {}
        }
        self.refresh_held();
        true
    }

    pub fn key_up(&mut self, code: &str) {
        self.held.retain(|c| c != code);
        self.refresh_held();
    }

    /// Window lost focus: keyup events will never arrive for held keys
    pub fn blur(&mut self) {
        self.held.clear();
        self.refresh_held();
    }

    /// Queue a pause toggle (the resume button)
    pub fn request_pause(&mut self) {
        self.input.pause = true;
    }

    /// Window lost focus or the tab was hidden: release held keys and leave the
    /// game paused. Returns true when a pause toggle was queued.
    pub fn focus_lost(&mut self, phase: GamePhase) -> bool {
        self.blur();
        match phase {
            GamePhase::Playing => {
                self.input.pause = true;
                true
            }
            // A toggle still pending here would resume the game
            GamePhase::Paused => {
                self.input.pause = false;
                false
            }
            GamePhase::GameOver => false,
        }
    }

    /// Current input for the next substep
    pub fn input(&self) -> &TickInput {
        &self.input
    }

    /// Clear one-shot inputs after a substep consumed them
    pub fn consume_one_shots(&mut self) {
        self.input.jump = false;
        self.input.special = false;
        self.input.pause = false;
        self.input.restart = false;
    }

    fn refresh_held(&mut self) {
        let mut left = false;
        let mut right = false;
        let mut up = false;
        let mut down = false;
        for code in &self.held {
            match Action::from_code(code) {
                Some(Action::Left) => left = true,
                Some(Action::Right) => right = true,
                Some(Action::Up) => up = true,
                Some(Action::Down) => down = true,
                _ => {}
            }
        }
        self.input.left = left;
        self.input.right = right;
        self.input.up = up;
        self.input.down = down;
    }
}
