use log::{debug, info};

use super::gravity::GravityFilter;
use crate::config::{DetectorConfig, GravityMode};
use crate::types::{DataPoint, ShakeEvent};

/// Threshold + debounce gate over linear acceleration magnitude.
///
/// A shake is accepted when the magnitude is strictly above `threshold` and
/// either no shake has been accepted yet or at least `debounce_ms` have
/// passed since the last accepted one.
#[derive(Debug, Clone)]
pub struct ShakeDetector {
    filter: GravityFilter,
    threshold: f64,
    debounce_ms: i64,
    last_shake_ms: Option<i64>,
}

impl ShakeDetector {
    pub fn new(config: &DetectorConfig) -> Self {
        Self {
            filter: GravityFilter::new(config.alpha, config.gravity_mode),
            threshold: config.threshold,
            debounce_ms: config.debounce_ms,
            last_shake_ms: None,
        }
    }

    pub fn last_shake_ms(&self) -> Option<i64> {
        self.last_shake_ms
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn gravity_mode(&self) -> GravityMode {
        self.filter.mode()
    }

    /// 清空重力估计和上次摇晃时间
    pub fn reset(&mut self) {
        self.filter.reset();
        self.last_shake_ms = None;
    }

    /// Platform-style callback entry: a missing event is a no-op.
    pub fn on_sensor_event(&mut self, event: Option<&DataPoint>, now_ms: i64) -> Option<ShakeEvent> {
        event.and_then(|sample| self.process(sample, now_ms))
    }

    pub fn process(&mut self, sample: &DataPoint, now_ms: i64) -> Option<ShakeEvent> {
        if !sample.is_finite() {
            debug!("Dropping non-finite sample {:?}", sample);
            return None;
        }

        let magnitude = self.filter.update(sample).magnitude();
        self.check_magnitude(magnitude, now_ms)
    }

    pub fn check_magnitude(&mut self, magnitude: f64, now_ms: i64) -> Option<ShakeEvent> {
        if magnitude.is_nan() || magnitude <= self.threshold {
            return None;
        }

        if let Some(last) = self.last_shake_ms {
            let elapsed = now_ms.saturating_sub(last);
            if elapsed < self.debounce_ms {
                debug!("Shake suppressed: {}ms since last (window {}ms)", elapsed, self.debounce_ms);
                return None;
            }
        }

        self.last_shake_ms = Some(now_ms);
        info!("Shake detected: magnitude {:.3} > {:.3}", magnitude, self.threshold);
        Some(ShakeEvent::new(magnitude, now_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> ShakeDetector {
        ShakeDetector::new(&DetectorConfig::default())
    }

    #[test]
    fn magnitude_at_or_below_threshold_never_fires() {
        let mut detector = detector();
        assert!(detector.check_magnitude(2.7, 0).is_none());
        assert!(detector.check_magnitude(2.0, 10_000).is_none());
        assert!(detector.check_magnitude(0.0, 20_000).is_none());
        assert_eq!(detector.last_shake_ms(), None);
    }

    #[test]
    fn first_qualifying_magnitude_fires() {
        let mut detector = detector();
        let event = detector.check_magnitude(2.71, 42).unwrap();
        assert_eq!(event.timestamp, 42);
        assert_eq!(detector.last_shake_ms(), Some(42));
    }

    #[test]
    fn one_shake_per_debounce_window() {
        let mut detector = detector();
        let fired = (0..50)
            .filter(|i| detector.check_magnitude(10.0, i * 100).is_some())
            .count();
        // samples span 0..=4900ms
        assert_eq!(fired, 1);
    }

    #[test]
    fn shakes_at_exactly_the_window_both_fire() {
        let mut detector = detector();
        assert!(detector.check_magnitude(5.0, 1_000).is_some());
        assert!(detector.check_magnitude(5.0, 6_000).is_some());
        assert_eq!(detector.last_shake_ms(), Some(6_000));
    }

    #[test]
    fn shake_just_inside_the_window_is_suppressed() {
        let mut detector = detector();
        assert!(detector.check_magnitude(5.0, 1_000).is_some());
        assert!(detector.check_magnitude(5.0, 5_999).is_none());
        // suppressed shakes do not move the window
        assert_eq!(detector.last_shake_ms(), Some(1_000));
        assert!(detector.check_magnitude(5.0, 6_000).is_some());
    }

    #[test]
    fn raw_sample_goes_through_gravity_filter() {
        let mut detector = detector();
        // reset-per-sample: linear = 0.8 * raw, so 3.0 -> 2.4 and 4.0 -> 3.2
        assert!(detector.process(&DataPoint::untimed(0.0, 0.0, 3.0), 0).is_none());
        let event = detector.process(&DataPoint::untimed(0.0, 0.0, 4.0), 0).unwrap();
        assert!((event.magnitude - 3.2).abs() < 1e-9);
    }

    #[test]
    fn smoothed_mode_ignores_resting_device() {
        let config = DetectorConfig {
            gravity_mode: GravityMode::Smoothed,
            ..DetectorConfig::default()
        };
        let mut detector = ShakeDetector::new(&config);
        let resting = DataPoint::untimed(0.0, 0.0, 9.81);

        // the estimate starts at zero, so the first readings look like a jolt
        for i in 0..40 {
            detector.process(&resting, i * 20);
        }
        let settled_at = detector.last_shake_ms();

        for i in 0..40 {
            assert!(detector.process(&resting, 10_000 + i * 20).is_none());
        }
        assert_eq!(detector.last_shake_ms(), settled_at);

        assert!(detector.process(&DataPoint::untimed(8.0, 0.0, 9.81), 20_000).is_some());
    }

    #[test]
    fn missing_and_non_finite_events_are_ignored() {
        let mut detector = detector();
        assert!(detector.on_sensor_event(None, 0).is_none());
        assert!(detector
            .on_sensor_event(Some(&DataPoint::untimed(f64::NAN, 0.0, 50.0)), 0)
            .is_none());
        assert!(detector
            .on_sensor_event(Some(&DataPoint::untimed(0.0, f64::INFINITY, 0.0)), 0)
            .is_none());
        assert_eq!(detector.last_shake_ms(), None);

        assert!(detector
            .on_sensor_event(Some(&DataPoint::untimed(0.0, 0.0, 50.0)), 0)
            .is_some());
    }

    #[test]
    fn extreme_timestamps_do_not_overflow() {
        let mut detector = detector();
        assert!(detector.check_magnitude(5.0, i64::MIN).is_some());
        assert!(detector.check_magnitude(5.0, 1_000).is_some());

        detector.reset();
        assert!(detector.check_magnitude(5.0, i64::MAX).is_some());
        assert!(detector.check_magnitude(5.0, i64::MIN).is_none());
        assert_eq!(detector.last_shake_ms(), Some(i64::MAX));
    }

    #[test]
    fn filtered_magnitude_exactly_at_threshold_does_not_fire() {
        // alpha 0.5 in reset mode halves the raw reading exactly
        let config = DetectorConfig {
            alpha: 0.5,
            ..DetectorConfig::default()
        };
        let mut detector = ShakeDetector::new(&config);
        assert_eq!(detector.gravity_mode(), GravityMode::ResetPerSample);

        assert!(detector.process(&DataPoint::untimed(0.0, 0.0, 5.4), 0).is_none());
        assert!(detector.process(&DataPoint::untimed(0.0, -5.4, 0.0), 0).is_none());
        assert!(detector.process(&DataPoint::untimed(0.0, 0.0, 5.41), 0).is_some());
    }

    #[test]
    fn reset_reopens_the_window() {
        let mut detector = detector();
        assert!(detector.check_magnitude(5.0, 0).is_some());
        detector.reset();
        assert!(detector.check_magnitude(5.0, 1).is_some());
    }
}
