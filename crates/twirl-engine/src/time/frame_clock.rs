use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time since the clock was started. Drives the rotation angle.
    pub elapsed: Duration,

    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f32,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

impl FrameTime {
    /// Elapsed time in seconds, as consumed by the frame transform.
    #[inline]
    pub fn seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }
}

/// Clock producing `FrameTime` snapshots relative to a fixed start instant.
///
/// Built on `Instant`, so elapsed time never goes backward even if the wall
/// clock is adjusted. Delta time is clamped to avoid pathological values when
/// the process is paused by a debugger or the window is minimized; `elapsed`
/// is never clamped.
#[derive(Debug, Clone)]
pub struct AnimationClock {
    start: Instant,
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl AnimationClock {
    /// Starts a clock at `start`.
    pub fn starting_at(start: Instant) -> Self {
        Self {
            start,
            last: start,
            frame_index: 0,
            dt_min: Duration::from_micros(100),
            dt_max: Duration::from_millis(250),
        }
    }

    /// Instant the clock was started at.
    pub fn start(&self) -> Instant {
        self.start
    }

    /// Advances the clock to the current instant.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock to `now`.
    ///
    /// An instant earlier than a previous tick saturates to zero progress.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let now = now.max(self.last);
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;

        let ft = FrameTime {
            elapsed: now.saturating_duration_since(self.start),
            dt: dt.as_secs_f32(),
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_at_start_is_zero_elapsed() {
        let start = Instant::now();
        let mut clock = AnimationClock::starting_at(start);
        let ft = clock.tick_at(start);
        assert_eq!(ft.elapsed, Duration::ZERO);
        assert_eq!(ft.frame_index, 0);
    }

    #[test]
    fn elapsed_tracks_start_instant() {
        let start = Instant::now();
        let mut clock = AnimationClock::starting_at(start);
        let ft = clock.tick_at(start + Duration::from_millis(1500));
        assert_eq!(ft.elapsed, Duration::from_millis(1500));
        assert!((ft.seconds() - 1.5).abs() < 1e-6);
    }

    #[test]
    fn elapsed_never_goes_backward() {
        let start = Instant::now();
        let mut clock = AnimationClock::starting_at(start);
        let a = clock.tick_at(start + Duration::from_secs(2));
        let b = clock.tick_at(start + Duration::from_secs(1));
        assert!(b.elapsed >= a.elapsed);
    }

    #[test]
    fn dt_is_clamped() {
        let start = Instant::now();
        let mut clock = AnimationClock::starting_at(start);
        let ft = clock.tick_at(start + Duration::from_secs(10));
        assert!((ft.dt - 0.25).abs() < 1e-6);
        // Elapsed is not affected by the dt clamp.
        assert_eq!(ft.elapsed, Duration::from_secs(10));
    }

    #[test]
    fn frame_index_increments() {
        let start = Instant::now();
        let mut clock = AnimationClock::starting_at(start);
        let indices: Vec<u64> = (1..=3)
            .map(|i| clock.tick_at(start + Duration::from_millis(16 * i)).frame_index)
            .collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }
}
