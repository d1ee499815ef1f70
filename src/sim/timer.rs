//! Repeating wall-clock timers with explicit cancellation
//!
//! Host callbacks (fire control, difficulty ramp) are modelled as
//! [`IntervalTimer`]s advanced by the frame loop instead of free-running
//! browser intervals.

/// A repeating timer measured in milliseconds
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    period_ms: f64,
    elapsed_ms: f64,
    running: bool,
}

impl IntervalTimer {
    /// Create a stopped timer
    pub fn new(period_ms: f64) -> Self {
        Self {
            period_ms,
            elapsed_ms: 0.0,
            running: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start (or restart) the timer with an empty phase
    pub fn start(&mut self) {
        self.elapsed_ms = 0.0;
        self.running = true;
    }

    /// Stop the timer. Calling this on a stopped timer is a no-op.
    pub fn cancel(&mut self) {
        self.running = false;
        self.elapsed_ms = 0.0;
    }

    /// Advance by `dt_ms` and return how many periods completed
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        if !self.running || dt_ms <= 0.0 {
            return 0;
        }
        self.elapsed_ms += dt_ms;
        let mut fired = 0;
        while self.elapsed_ms >= self.period_ms {
            self.elapsed_ms -= self.period_ms;
            fired += 1;
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_timer_never_fires() {
        let mut timer = IntervalTimer::new(100.0);
        assert_eq!(timer.advance(1000.0), 0);
    }

    #[test]
    fn test_fires_per_period() {
        let mut timer = IntervalTimer::new(200.0);
        timer.start();
        assert_eq!(timer.advance(150.0), 0);
        assert_eq!(timer.advance(50.0), 1);
        assert_eq!(timer.advance(650.0), 3);
        // 50 ms carried over
        assert_eq!(timer.advance(150.0), 1);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut timer = IntervalTimer::new(200.0);
        timer.cancel();
        timer.cancel();
        assert!(!timer.is_running());

        timer.start();
        timer.advance(150.0);
        timer.cancel();
        timer.cancel();
        assert!(!timer.is_running());
        assert_eq!(timer.advance(500.0), 0);
    }

    #[test]
    fn test_restart_clears_phase() {
        let mut timer = IntervalTimer::new(60_000.0);
        timer.start();
        timer.advance(59_000.0);
        timer.start();
        assert_eq!(timer.advance(2_000.0), 0);
        assert_eq!(timer.advance(58_000.0), 1);
    }
}
