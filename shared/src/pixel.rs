use std::f64::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Color, Particle, Point, RainConfig};

/// A falling raindrop, drawn as a `size` by `size` square.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pixel {
    pub position: Point,
    pub size: f64,
    pub speed_y: f64,
    pub color: Color,
}

impl Pixel {
    pub fn new(position: Point, size: f64, speed_y: f64, color: Color) -> Pixel {
        Pixel {
            position,
            size,
            speed_y,
            color,
        }
    }

    /// Falls by `speed_y`. Returns `true` once the pixel rests on `floor`,
    /// in which case it is clamped to `floor - size`.
    pub fn tick(&mut self, floor: f64) -> bool {
        self.position.1 += self.speed_y;

        if self.position.1 >= floor - self.size {
            self.position.1 = floor - self.size;
            true
        } else {
            false
        }
    }

    /// Breaks the pixel into `config.split_count` particles of half its size,
    /// each with a random heading and speed.
    pub fn split<'a, R: Rng>(
        &'a self,
        rng: &'a mut R,
        config: &'a RainConfig,
    ) -> impl Iterator<Item = Particle> + 'a {
        (0..config.split_count).map(move |_| {
            let angle = rng.gen_range(0.0..TAU);
            let speed = rng.gen_range(config.particle_speed.min..config.particle_speed.max);

            Particle::new(self.position, self.size / 2.0, angle, speed, self.color)
        })
    }
}

#[cfg(test)]
mod tests {
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

    use super::*;

    #[test]
    fn lands_on_floor() {
        let mut pixel = Pixel::new(Point(5.0, 90.0), 4.0, 3.0, Color::WHITE);

        assert!(!pixel.tick(100.0));
        assert_eq!(pixel.position.1, 93.0);

        assert!(pixel.tick(100.0));
        assert_eq!(pixel.position.1, 96.0);
    }

    #[test]
    fn split_yields_half_sized_particles() {
        let config = RainConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let pixel = Pixel::new(Point(12.0, 34.0), 4.0, 2.0, Color(1, 2, 3));

        let particles: Vec<Particle> = pixel.split(&mut rng, &config).collect();

        assert_eq!(particles.len(), 8);

        for particle in particles {
            assert_eq!(particle.size, 2.0);
            assert_eq!(particle.position, Point(12.0, 34.0));
            assert_eq!(particle.color, Color(1, 2, 3));
            assert!((0.0..TAU).contains(&particle.angle));
            assert!((1.0..4.0).contains(&particle.speed));
        }
    }
}
