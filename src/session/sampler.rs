/// Rate limiter for path sampling.
///
/// The host fires a transform notification on every rendering tick;
/// metrics only need one recorded sample per `interval_s`, which also
/// bounds the cost of the skeleton rebuild and the branch scans.
#[derive(Debug, Clone)]
pub struct SampleGate {
    interval_s: f64,
    last_sample: f64,
}

impl SampleGate {
    pub fn new(interval_s: f64) -> Self {
        SampleGate {
            interval_s,
            last_sample: f64::NEG_INFINITY,
        }
    }

    /// True iff the session is running and the throttle window has passed.
    /// Advances the window only on a successful sample; a paused session
    /// never mutates the gate.
    pub fn should_sample(&mut self, now: f64, running: bool) -> bool {
        if !running {
            return false;
        }
        if now - self.last_sample > self.interval_s {
            self.last_sample = now;
            return true;
        }
        false
    }

    /// Re-arms the gate so the next running tick samples immediately.
    pub fn reset(&mut self) {
        self.last_sample = f64::NEG_INFINITY;
    }
}

#[cfg(test)]
mod sampler_tests {
    use super::*;

    #[test]
    fn test_first_tick_samples() {
        let mut gate = SampleGate::new(0.25);
        assert!(gate.should_sample(100.0, true));
    }

    #[test]
    fn test_calls_inside_the_window_are_dropped() {
        let mut gate = SampleGate::new(0.25);
        assert!(gate.should_sample(100.0, true));
        assert!(!gate.should_sample(100.1, true));
    }

    #[test]
    fn test_calls_past_the_window_sample_again() {
        let mut gate = SampleGate::new(0.25);
        assert!(gate.should_sample(100.0, true));
        assert!(gate.should_sample(100.3, true));
    }

    #[test]
    fn test_paused_session_never_samples_nor_mutates() {
        let mut gate = SampleGate::new(0.25);
        assert!(!gate.should_sample(100.0, false));
        assert!(!gate.should_sample(200.0, false));
        // the paused calls must not have armed the window
        assert!(gate.should_sample(200.0, true));
        assert!(!gate.should_sample(200.1, true));
    }

    #[test]
    fn test_reset_rearms_the_gate() {
        let mut gate = SampleGate::new(0.25);
        assert!(gate.should_sample(100.0, true));
        gate.reset();
        assert!(gate.should_sample(100.0, true));
    }
}
