use std::time::{Duration, Instant};

use log::warn;
use spin_sleep::SpinSleeper;

/// Fixed-rate stand-in for a display's animation-frame callback.
///
/// Each [`FrameClock::tick`] waits out the rest of the current frame and
/// returns a monotonically increasing timestamp in milliseconds, measured
/// from the first tick.
pub struct FrameClock {
    frame_duration: Duration,
    sleeper: SpinSleeper,
    origin: Instant,
    last_tick: Option<Instant>,
}

impl FrameClock {
    /// `framerate` is in frames per second and must be non-zero.
    pub fn new(framerate: u32) -> Self {
        Self {
            frame_duration: Duration::from_secs_f64(1.0 / f64::from(framerate.max(1))),
            sleeper: SpinSleeper::default(),
            origin: Instant::now(),
            last_tick: None,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    pub fn tick(&mut self) -> f64 {
        let Some(last_tick) = self.last_tick else {
            let now = Instant::now();
            self.origin = now;
            self.last_tick = Some(now);
            return 0.0;
        };

        let elapsed = last_tick.elapsed();
        if elapsed < self.frame_duration {
            self.sleeper.sleep(self.frame_duration - elapsed);
        } else if elapsed > self.frame_duration {
            warn!(
                "Frame lag detected: target {}ms, actual {}ms",
                self.frame_duration.as_millis(),
                elapsed.as_millis()
            );
        }

        let now = Instant::now();
        self.last_tick = Some(now);
        now.duration_since(self.origin).as_secs_f64() * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_is_zero() {
        let mut clock = FrameClock::new(60);
        assert_eq!(clock.tick(), 0.0);
    }

    #[test]
    fn ticks_are_paced_and_increasing() {
        let mut clock = FrameClock::new(500);
        let mut previous = clock.tick();
        for _ in 0..5 {
            let timestamp = clock.tick();
            assert!(timestamp - previous >= 1.99, "{} -> {}", previous, timestamp);
            previous = timestamp;
        }
    }

    #[test]
    fn zero_framerate_is_treated_as_one() {
        assert_eq!(FrameClock::new(0).frame_duration(), Duration::from_secs(1));
    }
}
