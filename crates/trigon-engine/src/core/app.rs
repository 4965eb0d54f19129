use crate::input::{InputEvent, InputState};

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
pub trait App {
    /// Called for pointer input the GUI did not consume. `state` already
    /// includes `event`.
    fn on_input(&mut self, event: &InputEvent, state: &InputState) -> AppControl {
        let _ = (event, state);
        AppControl::Continue
    }

    /// Called once per rendered frame, inside the GUI pass.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl;
}
