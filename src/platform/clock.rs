//! Host frame clock

/// Turns monotonically increasing frame timestamps (ms) into deltas
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds since the previous frame.
    ///
    /// The first frame reports one nominal tick; a timestamp that goes
    /// backwards reports zero.
    pub fn delta_ms(&mut self, now_ms: f64) -> f64 {
        let dt = match self.last_ms {
            Some(last) => (now_ms - last).max(0.0),
            None => crate::consts::SIM_DT_MS,
        };
        self.last_ms = Some(now_ms);
        dt
    }
}
