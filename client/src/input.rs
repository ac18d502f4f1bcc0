//! Keyboard input turned into player commands with press-edge detection

use crate::dispatcher::Command;
use macroquad::prelude::*;
use shared::Direction;

/// Key state sampled once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeySample {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub attack: bool,
    pub confirm: bool,
    pub dismiss: bool,
}

impl KeySample {
    /// Samples the keyboard (both WASD and arrow keys walk).
    pub fn capture() -> Self {
        Self {
            up: is_key_down(KeyCode::W) || is_key_down(KeyCode::Up),
            down: is_key_down(KeyCode::S) || is_key_down(KeyCode::Down),
            left: is_key_down(KeyCode::A) || is_key_down(KeyCode::Left),
            right: is_key_down(KeyCode::D) || is_key_down(KeyCode::Right),
            attack: is_key_down(KeyCode::Space),
            confirm: is_key_down(KeyCode::Enter) || is_key_down(KeyCode::KpEnter),
            dismiss: is_key_down(KeyCode::Escape),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Command(Command),
    Confirm,
    Dismiss,
}

/// Emits one event per key press; holding a key does not repeat the command.
pub struct InputManager {
    previous: KeySample,
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            previous: KeySample::default(),
        }
    }

    pub fn update(&mut self) -> Vec<InputEvent> {
        self.process(KeySample::capture())
    }

    pub fn process(&mut self, sample: KeySample) -> Vec<InputEvent> {
        let prev = self.previous;
        self.previous = sample;

        let pressed = [
            (sample.up && !prev.up, InputEvent::Command(Command::Walk(Direction::Up))),
            (sample.down && !prev.down, InputEvent::Command(Command::Walk(Direction::Down))),
            (sample.left && !prev.left, InputEvent::Command(Command::Walk(Direction::Left))),
            (sample.right && !prev.right, InputEvent::Command(Command::Walk(Direction::Right))),
            (sample.attack && !prev.attack, InputEvent::Command(Command::Attack)),
            (sample.confirm && !prev.confirm, InputEvent::Confirm),
            (sample.dismiss && !prev.dismiss, InputEvent::Dismiss),
        ];

        pressed
            .into_iter()
            .filter_map(|(is_pressed, event)| is_pressed.then_some(event))
            .collect()
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Characters typed since the last frame, for the name prompt.
pub fn typed_chars() -> Vec<char> {
    let mut chars = Vec::new();
    while let Some(c) = get_char_pressed() {
        chars.push(c);
    }
    chars
}

pub fn backspace_pressed() -> bool {
    is_key_pressed(KeyCode::Backspace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_emits_once_while_held() {
        let mut input = InputManager::new();
        let held = KeySample {
            up: true,
            ..KeySample::default()
        };

        assert_eq!(
            input.process(held),
            vec![InputEvent::Command(Command::Walk(Direction::Up))]
        );
        assert!(input.process(held).is_empty());

        input.process(KeySample::default());
        assert_eq!(input.process(held).len(), 1);
    }

    #[test]
    fn test_simultaneous_presses() {
        let mut input = InputManager::new();
        let sample = KeySample {
            left: true,
            attack: true,
            confirm: true,
            ..KeySample::default()
        };

        assert_eq!(
            input.process(sample),
            vec![
                InputEvent::Command(Command::Walk(Direction::Left)),
                InputEvent::Command(Command::Attack),
                InputEvent::Confirm,
            ]
        );
    }

    #[test]
    fn test_release_emits_nothing() {
        let mut input = InputManager::new();
        input.process(KeySample {
            dismiss: true,
            right: true,
            ..KeySample::default()
        });
        assert!(input.process(KeySample::default()).is_empty());
    }
}
