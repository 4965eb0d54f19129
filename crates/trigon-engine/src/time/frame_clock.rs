use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Number of frames the rolling average covers.
const AVERAGE_WINDOW: usize = 60;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,

    /// Rolling frame statistics, including this tick.
    pub stats: FrameStats,
}

/// Averaged frame cost, as shown in the overlay.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct FrameStats {
    /// Mean frame time over the window, in milliseconds.
    pub avg_frame_ms: f32,
    /// Frames per second derived from `avg_frame_ms`.
    pub fps: f32,
}

impl FrameStats {
    fn from_window(samples: &VecDeque<f32>) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        let mean = samples.iter().sum::<f32>() / samples.len() as f32;
        if mean <= 0.0 {
            return Self::default();
        }

        Self {
            avg_frame_ms: mean * 1000.0,
            fps: 1.0 / mean,
        }
    }
}

/// Frame clock producing `FrameTime` snapshots.
///
/// One clock per window, so a window's stalls never leak into another's
/// delta time.
///
/// Delta time is clamped to avoid pathological values when the application is paused
/// by the debugger, minimized, or stalls.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
    window: VecDeque<f32>,
}

impl FrameClock {
    /// Creates a new clock with default clamps (0.1 ms to 250 ms).
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            frame_index: 0,
            dt_min,
            dt_max,
            window: VecDeque::with_capacity(AVERAGE_WINDOW),
        }
    }

    /// Resets the clock baseline.
    ///
    /// Called after surface reconfigures so the stall doesn't show up as a frame.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last);
        self.last = now;
        self.advance(dt, now)
    }

    /// Current rolling statistics without advancing.
    pub fn stats(&self) -> FrameStats {
        FrameStats::from_window(&self.window)
    }

    fn advance(&mut self, raw: Duration, now: Instant) -> FrameTime {
        let dt = raw.clamp(self.dt_min, self.dt_max).as_secs_f32();

        if self.window.len() == AVERAGE_WINDOW {
            self.window.pop_front();
        }
        self.window.push_back(dt);

        let ft = FrameTime {
            dt,
            now,
            frame_index: self.frame_index,
            stats: self.stats(),
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
