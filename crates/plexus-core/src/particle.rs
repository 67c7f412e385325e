//! The particle record.

use crate::Vec2;

/// A single animated point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Current position in field pixels.
    pub position: Vec2,
    /// Displacement per frame. Only the component signs ever change.
    pub velocity: Vec2,
    /// Radius of the drawn dot.
    pub radius: f64,
    /// Fill opacity (0.0 - 1.0).
    pub opacity: f64,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, radius: f64, opacity: f64) -> Self {
        Self {
            position,
            velocity,
            radius,
            opacity: opacity.clamp(0.0, 1.0),
        }
    }

    /// Velocity magnitude in pixels per frame.
    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opacity_clamped() {
        let p = Particle::new(Vec2::ZERO, Vec2::new(0.3, 0.4), 2.0, 1.7);
        assert_eq!(p.opacity, 1.0);
        assert!((p.speed() - 0.5).abs() < 1e-12);
    }
}
