/// Frame-driven animation clock.
///
/// One `advance` per rendered frame; the angle grows by the current speed,
/// not by wall-clock time, so a dropped frame slows the animation instead of
/// making it jump. Never reset.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    angle: f64,
    frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one frame tick at the given speed.
    pub fn advance(&mut self, speed: f64) {
        self.angle += speed;
        self.frames += 1;
    }

    /// Accumulated global angle.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Number of ticks so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let clock = FrameClock::new();
        assert_eq!(clock.angle(), 0.0);
        assert_eq!(clock.frames(), 0);
    }

    #[test]
    fn hundred_ticks_at_one_hundredth() {
        let mut clock = FrameClock::new();
        for _ in 0..100 {
            clock.advance(0.01);
        }
        assert!((clock.angle() - 1.0).abs() < 1e-9, "angle was {}", clock.angle());
        assert_eq!(clock.frames(), 100);
    }

    #[test]
    fn zero_speed_still_counts_frames() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        clock.advance(0.0);
        assert_eq!(clock.angle(), 0.0);
        assert_eq!(clock.frames(), 2);
    }
}
