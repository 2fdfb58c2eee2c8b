use nalgebra::Vector3;

use crate::config::TutorConfig;
use crate::geometry::angle_between_degrees;

/// Cutter shaft axis in the cutter frame.
pub fn shaft_direction() -> Vector3<f64> {
    Vector3::new(0.0, 1.0, 0.0)
}

/// Jaw opening angle in degrees, derived from the trigger orientation.
///
/// The trigger-to-shaft angle is clamped to the handle's physical range
/// before scaling; with the defaults a squeezed trigger maps to 0 and a
/// released one to -26.4 degrees.
pub fn open_angle_deg(trigger_direction: &Vector3<f64>, config: &TutorConfig) -> f64 {
    let mut trigger_angle = angle_between_degrees(trigger_direction, &shaft_direction());
    if trigger_angle < config.trigger_angle_min_deg {
        trigger_angle = config.trigger_angle_min_deg;
    }
    if trigger_angle > config.trigger_angle_max_deg {
        trigger_angle = config.trigger_angle_max_deg;
    }
    (trigger_angle - config.trigger_angle_min_deg) * config.open_angle_scale
}

/// Debounce for cut evaluation, independent from the sample throttle.
#[derive(Debug, Clone)]
pub struct CutGate {
    debounce_s: f64,
    closed_threshold_deg: f64,
    last_cut: f64,
}

impl CutGate {
    pub fn new(debounce_s: f64, closed_threshold_deg: f64) -> Self {
        CutGate {
            debounce_s,
            closed_threshold_deg,
            last_cut: f64::NEG_INFINITY,
        }
    }

    /// True iff the cutter is fully closed, the session is running and the
    /// debounce window since the last triggered cut has elapsed. Arms the
    /// window on success.
    pub fn should_trigger(&mut self, open_angle_deg: f64, now: f64, running: bool) -> bool {
        if open_angle_deg.abs() < self.closed_threshold_deg
            && running
            && now - self.last_cut > self.debounce_s
        {
            self.last_cut = now;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.last_cut = f64::NEG_INFINITY;
    }
}

#[cfg(test)]
mod cutter_tests {
    use super::*;
    use approx::assert_relative_eq;

    fn trigger_at(angle_deg: f64) -> Vector3<f64> {
        let rad = angle_deg.to_radians();
        Vector3::new(rad.sin(), rad.cos(), 0.0)
    }

    #[test]
    fn test_open_angle_scales_the_clamped_trigger_angle() {
        let config = TutorConfig::default();
        assert_relative_eq!(
            open_angle_deg(&trigger_at(96.0), &config),
            -13.2,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            open_angle_deg(&trigger_at(102.0), &config),
            -26.4,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_open_angle_clamps_below_and_above_the_handle_range() {
        let config = TutorConfig::default();
        // below the range: clamped up to 90, i.e. fully closed
        assert_relative_eq!(open_angle_deg(&trigger_at(45.0), &config), 0.0, epsilon = 1e-9);
        // beyond the range: clamped down to 102
        assert_relative_eq!(
            open_angle_deg(&trigger_at(130.0), &config),
            -26.4,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_closed_jaw_triggers_once_per_debounce_window() {
        let mut gate = CutGate::new(3.0, 0.25);
        assert!(gate.should_trigger(0.0, 10.0, true));
        assert!(!gate.should_trigger(0.0, 11.0, true));
        assert!(!gate.should_trigger(0.0, 13.0, true));
        assert!(gate.should_trigger(0.0, 13.5, true));
    }

    #[test]
    fn test_open_jaw_never_triggers() {
        let mut gate = CutGate::new(3.0, 0.25);
        assert!(!gate.should_trigger(-13.2, 10.0, true));
        assert!(!gate.should_trigger(0.26, 10.0, true));
    }

    #[test]
    fn test_stopped_session_never_triggers() {
        let mut gate = CutGate::new(3.0, 0.25);
        assert!(!gate.should_trigger(0.0, 10.0, false));
        // the stopped call must not have armed the window
        assert!(gate.should_trigger(0.0, 10.0, true));
    }
}
