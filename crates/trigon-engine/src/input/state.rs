use std::collections::HashSet;

use super::types::{
    InputEvent, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent,
};

/// Current pointer state for a single window.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in logical pixels.
    pub pointer_pos: Option<(f32, f32)>,

    /// Set of currently held mouse buttons.
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    pub fn apply_event(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Avoid stuck buttons when focus changes mid-press.
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::PointerButton(PointerButtonEvent {
                button,
                state,
                x,
                y,
            }) => {
                self.pointer_pos = Some((*x, *y));
                match state {
                    MouseButtonState::Pressed => {
                        self.buttons_down.insert(*button);
                    }
                    MouseButtonState::Released => {
                        self.buttons_down.remove(button);
                    }
                }
            }

            // Wheel input is event-only; nothing is held.
            InputEvent::MouseWheel(_) => {}
        }
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseWheelDelta;

    fn press(button: MouseButton, state: MouseButtonState) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button,
            state,
            x: 10.0,
            y: 20.0,
        })
    }

    #[test]
    fn buttons_track_press_and_release() {
        let mut input = InputState::default();

        input.apply_event(&press(MouseButton::Left, MouseButtonState::Pressed));
        assert!(input.button_down(MouseButton::Left));
        assert_eq!(input.pointer_pos, Some((10.0, 20.0)));

        input.apply_event(&press(MouseButton::Left, MouseButtonState::Released));
        assert!(!input.button_down(MouseButton::Left));
    }

    #[test]
    fn focus_loss_releases_buttons() {
        let mut input = InputState::default();
        input.apply_event(&InputEvent::Focused(true));
        input.apply_event(&press(MouseButton::Right, MouseButtonState::Pressed));

        input.apply_event(&InputEvent::Focused(false));
        assert!(!input.focused);
        assert!(input.buttons_down.is_empty());
    }

    #[test]
    fn pointer_left_clears_position() {
        let mut input = InputState::default();
        input.apply_event(&InputEvent::PointerMoved(PointerMoveEvent { x: 1.0, y: 2.0 }));
        input.apply_event(&InputEvent::PointerLeft);
        assert_eq!(input.pointer_pos, None);
    }

    #[test]
    fn wheel_leaves_held_state_alone() {
        let mut input = InputState::default();
        input.apply_event(&press(MouseButton::Middle, MouseButtonState::Pressed));
        input.apply_event(&InputEvent::MouseWheel(MouseWheelDelta::Line { x: 0.0, y: 1.0 }));

        assert!(input.button_down(MouseButton::Middle));
        assert_eq!(input.pointer_pos, Some((10.0, 20.0)));
    }
}
