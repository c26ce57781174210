//! The engine's wall-clock source.

use std::time::Instant;

/// Millisecond clock behind the `runtimeControl.timeInMilliseconds` import.
///
/// The only contract is that readings never decrease; the engine busy-waits
/// on this value to pace its frames, so time zero is arbitrary.
pub trait Clock {
    fn elapsed_ms(&mut self) -> i64;
}

/// Monotonic clock counting from its construction instant.
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed_ms(&mut self) -> i64 {
        self.origin.elapsed().as_millis() as i64
    }
}
