use crate::config::GravityMode;
use crate::types::DataPoint;

/// Acceleration with the gravity component removed
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LinearAcceleration {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl LinearAcceleration {
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// 低通滤波估计重力分量: gravity = alpha * gravity + (1 - alpha) * raw
#[derive(Debug, Clone)]
pub struct GravityFilter {
    alpha: f64,
    mode: GravityMode,
    gravity: [f64; 3],
}

impl GravityFilter {
    pub fn new(alpha: f64, mode: GravityMode) -> Self {
        Self {
            alpha,
            mode,
            gravity: [0.0; 3],
        }
    }

    pub fn gravity(&self) -> [f64; 3] {
        self.gravity
    }

    pub fn mode(&self) -> GravityMode {
        self.mode
    }

    pub fn reset(&mut self) {
        self.gravity = [0.0; 3];
    }

    /// Folds one sample into the estimate and returns raw minus gravity.
    pub fn update(&mut self, sample: &DataPoint) -> LinearAcceleration {
        if self.mode == GravityMode::ResetPerSample {
            self.reset();
        }

        let raw = [sample.x, sample.y, sample.z];
        for (g, r) in self.gravity.iter_mut().zip(raw) {
            *g = self.alpha * *g + (1.0 - self.alpha) * r;
        }

        LinearAcceleration {
            x: raw[0] - self.gravity[0],
            y: raw[1] - self.gravity[1],
            z: raw[2] - self.gravity[2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn reset_per_sample_keeps_eighty_percent_of_raw() {
        let mut filter = GravityFilter::new(0.8, GravityMode::ResetPerSample);
        filter.update(&DataPoint::untimed(10.0, 10.0, 10.0));

        let linear = filter.update(&DataPoint::untimed(0.0, 0.0, 9.81));
        assert!(linear.x.abs() < EPS);
        assert!((linear.z - 0.8 * 9.81).abs() < EPS);
        assert!((filter.gravity()[2] - 0.2 * 9.81).abs() < EPS);
    }

    #[test]
    fn smoothed_mode_converges_on_constant_gravity() {
        let mut filter = GravityFilter::new(0.8, GravityMode::Smoothed);
        let resting = DataPoint::untimed(0.0, 0.0, 9.81);

        let first = filter.update(&resting);
        assert!((first.z - 0.8 * 9.81).abs() < EPS);

        let mut last = first;
        for _ in 0..100 {
            last = filter.update(&resting);
        }
        assert!(last.magnitude() < 1e-6);
        assert!((filter.gravity()[2] - 9.81).abs() < 1e-6);
    }

    #[test]
    fn smoothed_mode_carries_state_between_samples() {
        let mut filter = GravityFilter::new(0.8, GravityMode::Smoothed);
        filter.update(&DataPoint::untimed(5.0, 0.0, 0.0));
        // gravity.x = 0.2 * 5 = 1.0, then 0.8 * 1.0 + 0.2 * 5 = 1.8
        let linear = filter.update(&DataPoint::untimed(5.0, 0.0, 0.0));
        assert!((filter.gravity()[0] - 1.8).abs() < EPS);
        assert!((linear.x - 3.2).abs() < EPS);

        filter.reset();
        assert_eq!(filter.gravity(), [0.0; 3]);
    }
}
