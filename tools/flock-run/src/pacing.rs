//! Fixed-rate pacing for watching an episode in real time.

use std::time::{Duration, Instant};

/// Nominal duration of one tick at `tick_rate` Hz.
pub fn tick_duration(tick_rate: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / tick_rate.max(1) as u64)
}

/// Sleeps between ticks so the episode advances at a steady rate.
pub struct Pacer {
    tick: Duration,
    next_tick_time: Instant,
}

impl Pacer {
    pub fn new(tick_rate: u32) -> Self {
        Self {
            tick: tick_duration(tick_rate),
            next_tick_time: Instant::now(),
        }
    }

    /// Block until the next tick is due.
    pub fn wait(&mut self) {
        self.next_tick_time += self.tick;
        let now = Instant::now();
        if self.next_tick_time > now {
            std::thread::sleep(self.next_tick_time - now);
        } else if now - self.next_tick_time > self.tick * 2 {
            // Too far behind; reset to avoid a catch-up spiral
            self.next_tick_time = now;
        }
    }
}
