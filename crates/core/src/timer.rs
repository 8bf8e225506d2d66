use crate::time::format_mm_ss;

/// Elapsed-seconds counter for one session.
///
/// The owner drives it with one `tick` per second; ticks are ignored while stopped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timer {
    elapsed: u32,
    running: bool,
}

impl Timer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to zero and start counting. Restarting a running timer does not accumulate.
    pub fn start(&mut self) {
        self.elapsed = 0;
        self.running = true;
    }

    /// Stop counting, keeping the last value.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Stop and clear back to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance by one second. Returns false when the timer is stopped.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(1);
        true
    }

    #[must_use]
    pub fn read(&self) -> u32 {
        self.elapsed
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current reading as `MM:SS`.
    #[must_use]
    pub fn format(&self) -> String {
        format_mm_ss(self.elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixty_five_ticks_format_as_one_minute_five() {
        let mut timer = Timer::new();
        timer.start();
        for _ in 0..65 {
            assert!(timer.tick());
        }
        assert_eq!(timer.read(), 65);
        assert_eq!(timer.format(), "01:05");
    }

    #[test]
    fn stop_preserves_value_and_ignores_ticks() {
        let mut timer = Timer::new();
        timer.start();
        timer.tick();
        timer.tick();
        timer.stop();
        assert!(!timer.tick());
        assert_eq!(timer.read(), 2);
        assert!(!timer.is_running());
    }

    #[test]
    fn restart_begins_from_zero() {
        let mut timer = Timer::new();
        timer.start();
        timer.tick();
        timer.start();
        assert_eq!(timer.read(), 0);
        assert!(timer.is_running());
    }

    #[test]
    fn unstarted_timer_does_not_count() {
        let mut timer = Timer::new();
        assert!(!timer.tick());
        assert_eq!(timer.format(), "00:00");
    }
}
