//! Input events and per-tick input accumulation

use glam::Vec2;

use crate::sim::TickInput;

/// A single device event, already decoded from whatever backend produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Jump,
    CrouchPressed,
    CrouchReleased,
    Fire,
    /// Any key without a game binding
    AnyKey,
    /// Pointer click in screen coordinates
    Click(Vec2),
    ToggleIdle,
    Quit,
}

impl InputEvent {
    /// Decode a key-down by its key name
    pub fn key_down(key: &str) -> Self {
        match key {
            "ArrowUp" | "w" | "W" => InputEvent::Jump,
            "ArrowDown" | "s" | "S" => InputEvent::CrouchPressed,
            " " | "Space" => InputEvent::Fire,
            "i" | "I" => InputEvent::ToggleIdle,
            "Escape" | "q" | "Q" => InputEvent::Quit,
            _ => InputEvent::AnyKey,
        }
    }

    /// Decode a key-up by its key name. Only crouch cares about releases.
    pub fn key_up(key: &str) -> Option<Self> {
        match key {
            "ArrowDown" | "s" | "S" => Some(InputEvent::CrouchReleased),
            _ => None,
        }
    }
}

/// Accumulates events between ticks
///
/// Held inputs (crouch, idle mode) persist; one-shot inputs are cleared once
/// a tick has consumed them. The host window or terminal decodes its device
/// events with `InputEvent::key_down`/`key_up` and passes them to `handle`.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    input: TickInput,
    quit: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::Jump => {
                self.input.jump = true;
                self.input.any_key = true;
            }
            InputEvent::CrouchPressed => {
                self.input.crouch = true;
                self.input.any_key = true;
            }
            InputEvent::CrouchReleased => self.input.crouch = false,
            InputEvent::Fire => {
                self.input.fire = true;
                self.input.any_key = true;
            }
            InputEvent::AnyKey => self.input.any_key = true,
            InputEvent::Click(pos) => self.input.click = Some(pos),
            InputEvent::ToggleIdle => {
                self.input.idle_mode = !self.input.idle_mode;
                log::info!("Idle mode: {}", self.input.idle_mode);
            }
            InputEvent::Quit => self.quit = true,
        }
    }

    pub fn set_idle(&mut self, idle: bool) {
        self.input.idle_mode = idle;
    }

    /// Input for the next tick
    pub fn current(&self) -> &TickInput {
        &self.input
    }

    /// Clear one-shot inputs after processing
    pub fn end_tick(&mut self) {
        self.input.jump = false;
        self.input.fire = false;
        self.input.any_key = false;
        self.input.click = None;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}
