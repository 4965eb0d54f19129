//! Time subsystem.
//!
//! One `FrameClock` per window; call `tick()` once per rendered frame to get
//! a `FrameTime` carrying the clamped delta and the rolling `FrameStats`.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameStats, FrameTime};
