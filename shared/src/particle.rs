use serde::{Deserialize, Serialize};

use crate::{Color, Point};

/// A decaying fragment thrown off when a [`Pixel`](crate::Pixel) splits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: Point,
    pub size: f64,
    /// Heading in radians.
    pub angle: f64,
    pub speed: f64,
    pub color: Color,
}

impl Particle {
    pub fn new(position: Point, size: f64, angle: f64, speed: f64, color: Color) -> Particle {
        Particle {
            position,
            size,
            angle,
            speed,
            color,
        }
    }

    /// Moves one step along the heading, then shrinks by `decay`.
    /// Sizes below `threshold` collapse to exactly zero.
    pub fn tick(&mut self, decay: f64, threshold: f64) {
        self.position.0 += self.angle.cos() * self.speed;
        self.position.1 += self.angle.sin() * self.speed;
        self.size *= decay;

        if self.size < threshold {
            self.size = 0.0;
        }
    }

    pub fn is_alive(&self) -> bool {
        self.size > 0.0
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn moves_along_angle() {
        let mut particle = Particle::new(Point(10.0, 10.0), 2.0, FRAC_PI_2, 3.0, Color::WHITE);

        particle.tick(0.95, 0.5);

        assert!((particle.position.0 - 10.0).abs() < 1e-9);
        assert!((particle.position.1 - 13.0).abs() < 1e-9);
    }

    #[test]
    fn decays_then_collapses_to_zero() {
        let mut particle = Particle::new(Point(0.0, 0.0), 2.0, 0.0, 1.0, Color::WHITE);
        let mut ticks = 0;

        while particle.is_alive() {
            let before = particle.size;
            particle.tick(0.95, 0.5);
            ticks += 1;

            if particle.is_alive() {
                assert!((particle.size - before * 0.95).abs() < 1e-12);
                assert!(particle.size >= 0.5);
            } else {
                assert_eq!(particle.size, 0.0);
                assert!(before * 0.95 < 0.5);
            }
        }

        // 2 * 0.95^28 < 0.5 <= 2 * 0.95^27
        assert_eq!(ticks, 28);
    }
}
