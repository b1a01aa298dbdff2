//! Frame pacing for the interactive viewer.
//!
//! The flock has no notion of time: one call to [`Flock::step`](crate::Flock::step)
//! is one frame. The viewer uses a [`FramePacer`] to decide when the next
//! frame is due so the flock advances at a steady rate regardless of how
//! often the window asks to be redrawn.
//!
//! # Example
//!
//! ```
//! use boids::time::FramePacer;
//! use std::time::{Duration, Instant};
//!
//! let start = Instant::now();
//! let mut pacer = FramePacer::starting_at(60.0, start);
//!
//! assert!(pacer.frame_due(start));
//! pacer.begin_frame(start);
//! assert!(!pacer.frame_due(start + Duration::from_millis(5)));
//! assert!(pacer.frame_due(start + Duration::from_millis(17)));
//! ```

use std::time::{Duration, Instant};

/// Fixed-rate frame scheduler with frame counting and FPS measurement.
#[derive(Debug)]
pub struct FramePacer {
    interval: Duration,
    next_frame: Instant,
    frames: u64,
    /// Frames started since `window_start`.
    window_frames: u32,
    window_start: Instant,
    fps: f32,
}

/// Length of the window the FPS is averaged over.
const FPS_WINDOW: Duration = Duration::from_millis(500);

impl FramePacer {
    /// Pacer targeting `target_fps` frames per second, first frame due now.
    pub fn new(target_fps: f32) -> Self {
        Self::starting_at(target_fps, Instant::now())
    }

    /// Pacer whose first frame is due at `now`. Rates below 1 FPS are raised to 1.
    pub fn starting_at(target_fps: f32, now: Instant) -> Self {
        let nanos = (1e9 / f64::from(target_fps.max(1.0))).round() as u64;
        Self {
            interval: Duration::from_nanos(nanos),
            next_frame: now,
            frames: 0,
            window_frames: 0,
            window_start: now,
            fps: 0.0,
        }
    }

    /// Whether a new frame should start at `now`.
    #[inline]
    pub fn frame_due(&self, now: Instant) -> bool {
        now >= self.next_frame
    }

    /// When the next frame is due.
    #[inline]
    pub fn next_frame(&self) -> Instant {
        self.next_frame
    }

    /// Record that a frame started at `now` and schedule the next one.
    ///
    /// If the loop fell behind by more than a frame the schedule restarts
    /// from `now` instead of trying to catch up.
    pub fn begin_frame(&mut self, now: Instant) {
        self.next_frame += self.interval;
        if self.next_frame < now {
            self.next_frame = now + self.interval;
        }

        self.frames += 1;
        self.window_frames += 1;

        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed >= FPS_WINDOW {
            self.fps = self.window_frames as f32 / elapsed.as_secs_f32();
            self.window_frames = 0;
            self.window_start = now;
        }
    }

    /// Frames started so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frames
    }

    /// Frames per second over the last measurement window, 0 until the first
    /// window closes.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pacer_new() {
        let pacer = FramePacer::new(60.0);
        assert_eq!(pacer.frame(), 0);
        assert!((pacer.interval().as_secs_f32() - 1.0 / 60.0).abs() < 1e-6);
        assert!(pacer.frame_due(Instant::now()));
    }

    #[test]
    fn test_frames_are_spaced_by_interval() {
        let start = Instant::now();
        let mut pacer = FramePacer::starting_at(50.0, start);

        pacer.begin_frame(start);
        assert_eq!(pacer.frame(), 1);
        assert_eq!(pacer.next_frame(), start + Duration::from_millis(20));
        assert!(!pacer.frame_due(start + Duration::from_millis(19)));
        assert!(pacer.frame_due(start + Duration::from_millis(20)));
    }

    #[test]
    fn test_falling_behind_resets_schedule() {
        let start = Instant::now();
        let mut pacer = FramePacer::starting_at(50.0, start);

        let late = start + Duration::from_secs(1);
        pacer.begin_frame(late);
        assert_eq!(pacer.next_frame(), late + Duration::from_millis(20));
    }

    #[test]
    fn test_fps_measurement() {
        let start = Instant::now();
        let mut pacer = FramePacer::starting_at(10.0, start);

        for i in 1..=10 {
            pacer.begin_frame(start + Duration::from_millis(100 * i));
        }
        assert!((pacer.fps() - 10.0).abs() < 0.5, "fps = {}", pacer.fps());
    }

    #[test]
    fn test_low_rates_are_clamped() {
        let pacer = FramePacer::new(0.0);
        assert_eq!(pacer.interval(), Duration::from_secs(1));
    }
}
