//! Shared utilities: frame timing

use std::collections::VecDeque;
use std::time::{Duration, Instant};

// ============================================================================
// FPS Counter
// ============================================================================

/// FPS counter with rolling average
pub struct FpsCounter {
    frame_times: VecDeque<f32>,
    last_frame: Instant,
    sample_count: usize,
}

impl FpsCounter {
    /// Create a new FPS counter with specified sample window
    pub fn new(sample_count: usize) -> Self {
        Self {
            frame_times: VecDeque::with_capacity(sample_count),
            last_frame: Instant::now(),
            sample_count,
        }
    }

    /// Call at the start of each frame to record timing.
    /// Returns (delta_time, average_fps).
    pub fn tick(&mut self) -> (f32, f32) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.frame_times.push_back(dt);
        if self.frame_times.len() > self.sample_count {
            self.frame_times.pop_front();
        }

        let avg_dt: f32 =
            self.frame_times.iter().sum::<f32>() / self.frame_times.len().max(1) as f32;
        let avg_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };

        (dt, avg_fps)
    }
}

// ============================================================================
// Frame Throttle
// ============================================================================

/// Fixed-step frame cap: accumulate elapsed time, fire once the budget is
/// exceeded, then reset the accumulator. A throttle, not a fixed-timestep
/// simulator — overshoot is discarded, never carried over.
pub struct FrameThrottle {
    budget: Duration,
    accumulated: Duration,
}

impl FrameThrottle {
    /// Cap at `fps` frames per second. A non-positive cap disables the
    /// throttle (every tick fires).
    pub fn new(fps: f32) -> Self {
        let budget = if fps > 0.0 {
            Duration::from_secs_f32(1.0 / fps)
        } else {
            Duration::ZERO
        };
        Self {
            budget,
            accumulated: Duration::ZERO,
        }
    }

    /// Add elapsed time; returns true when a frame is due
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        self.accumulated += elapsed;
        if self.accumulated >= self.budget {
            self.accumulated = Duration::ZERO;
            true
        } else {
            false
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throttle_blocks_until_budget_exceeded() {
        let mut throttle = FrameThrottle::new(60.0); // ~16.67ms budget
        assert!(!throttle.tick(Duration::from_millis(5)));
        assert!(!throttle.tick(Duration::from_millis(5)));
        assert!(!throttle.tick(Duration::from_millis(5)));
        // 20ms accumulated
        assert!(throttle.tick(Duration::from_millis(5)));
    }

    #[test]
    fn test_throttle_resets_after_firing() {
        let mut throttle = FrameThrottle::new(60.0);
        assert!(throttle.tick(Duration::from_millis(100)));
        // Overshoot is discarded, not carried over
        assert!(!throttle.tick(Duration::from_millis(10)));
    }

    #[test]
    fn test_throttle_fires_on_exact_budget() {
        let mut throttle = FrameThrottle::new(50.0); // 20ms
        assert!(throttle.tick(Duration::from_millis(20)));
    }

    #[test]
    fn test_uncapped_throttle_always_fires() {
        let mut throttle = FrameThrottle::new(0.0);
        assert!(throttle.tick(Duration::ZERO));
        assert!(throttle.tick(Duration::from_micros(1)));
    }
}
