/// Uniform circular orbits: pure math, no engine dependencies.
///
/// Uses f64 throughout (the global angle only ever grows).
/// Only convert to f32 at the final entity-position step in driver.rs.

/// Self-rotation added to every visible body each frame, in radians.
/// Independent of the animation speed.
pub const SPIN_RATE: f64 = 0.01;

/// Circular orbit in the XZ plane around the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    /// Orbital radius in world units.
    pub distance: f64,
    /// Angular speed multiplier applied to the global angle.
    pub speed: f64,
}

impl Orbit {
    pub const fn new(distance: f64, speed: f64) -> Self {
        Self { distance, speed }
    }

    /// Position `(x, z)` at the accumulated global `angle`.
    pub fn position(&self, angle: f64) -> (f64, f64) {
        let theta = angle * self.speed;
        (self.distance * theta.cos(), self.distance * theta.sin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn starts_on_positive_x_axis() {
        let (x, z) = Orbit::new(50.0, 0.05).position(0.0);
        assert!((x - 50.0).abs() < EPS);
        assert!(z.abs() < EPS);
    }

    #[test]
    fn position_law_holds_across_angles() {
        let orbits = [Orbit::new(20.0, 0.2), Orbit::new(140.0, 0.008), Orbit::new(190.0, 0.004)];
        for orbit in &orbits {
            for step in 0..200 {
                let angle = step as f64 * 0.37;
                let (x, z) = orbit.position(angle);
                assert!((x - orbit.distance * (angle * orbit.speed).cos()).abs() < EPS);
                assert!((z - orbit.distance * (angle * orbit.speed).sin()).abs() < EPS);
            }
        }
    }

    #[test]
    fn radius_is_constant() {
        let orbit = Orbit::new(75.0, 0.04);
        for step in 0..50 {
            let (x, z) = orbit.position(step as f64 * 3.0);
            assert!(((x * x + z * z).sqrt() - 75.0).abs() < 1e-9);
        }
    }

    #[test]
    fn quarter_turn_lands_on_z_axis() {
        let orbit = Orbit::new(10.0, 1.0);
        let (x, z) = orbit.position(std::f64::consts::FRAC_PI_2);
        assert!(x.abs() < EPS);
        assert!((z - 10.0).abs() < EPS);
    }
}
