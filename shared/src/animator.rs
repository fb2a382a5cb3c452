use std::ops::AddAssign;

use rand::Rng;
use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

use crate::{Extent, Particle, Pixel, Point, RainConfig, Rect};

/// Counts of what happened during one [`Animator::tick`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Pixels that hit the floor and were removed.
    pub landed: usize,
    /// Particles created by those landings.
    pub particles_created: usize,
    /// Particles removed after decaying to zero.
    pub expired: usize,
    /// Pixels added by a spawned group.
    pub spawned: usize,
}

impl AddAssign for TickReport {
    fn add_assign(&mut self, rhs: Self) {
        self.landed += rhs.landed;
        self.particles_created += rhs.particles_created;
        self.expired += rhs.expired;
        self.spawned += rhs.spawned;
    }
}

/// Owns the falling [`Pixel`]s and their [`Particle`] fragments and advances them frame by frame.
///
/// The animator never draws. A renderer reads [`Animator::pixels`] and [`Animator::particles`]
/// after each tick.
pub struct Animator {
    config: RainConfig,
    bounds: Extent,
    pixels: Vec<Pixel>,
    particles: Vec<Particle>,
    rng: ChaCha8Rng,
}

impl Animator {
    /// `config` is expected to have passed [`RainConfig::validate`].
    pub fn new(config: RainConfig, bounds: Extent, seed: u64) -> Animator {
        Animator {
            config,
            bounds,
            pixels: Vec::new(),
            particles: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &RainConfig {
        &self.config
    }

    pub fn bounds(&self) -> Extent {
        self.bounds
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Follows a canvas resize. Pixels already below the new floor land on the next tick.
    pub fn resize(&mut self, bounds: Extent) {
        self.bounds = bounds;
    }

    /// One animation frame: pixels, then particles, then a possible new group.
    pub fn tick(&mut self) -> TickReport {
        let (landed, particles_created) = self.step_pixels();
        let expired = self.step_particles();

        let spawned = if self.rng.gen_bool(self.config.spawn_probability) {
            self.spawn_group()
        } else {
            0
        };

        TickReport {
            landed,
            particles_created,
            expired,
            spawned,
        }
    }

    /// Drops every pixel by its speed. Those reaching the floor split and are removed.
    /// Returns the number of pixels landed and particles created.
    pub fn step_pixels(&mut self) -> (usize, usize) {
        let Animator {
            config,
            bounds,
            pixels,
            particles,
            rng,
        } = self;

        let before = particles.len();
        let mut landed = 0;

        pixels.retain_mut(|pixel| {
            if pixel.tick(bounds.height) {
                particles.extend(pixel.split(rng, config));
                landed += 1;
                false
            } else {
                true
            }
        });

        (landed, particles.len() - before)
    }

    /// Advances every particle and drops the ones that decayed to nothing.
    /// Returns the number removed.
    pub fn step_particles(&mut self) -> usize {
        let (decay, threshold) = (self.config.decay, self.config.decay_threshold);
        let before = self.particles.len();

        self.particles.retain_mut(|particle| {
            particle.tick(decay, threshold);
            particle.is_alive()
        });

        before - self.particles.len()
    }

    /// Spawns a group along the top edge at a random horizontal offset.
    pub fn spawn_group(&mut self) -> usize {
        let x = if self.bounds.width > 0.0 {
            self.rng.gen_range(0.0..self.bounds.width)
        } else {
            0.0
        };

        self.spawn_group_at(Point(x, 0.0))
    }

    /// Spawns `batch_size` pixels stacked on `origin`, each with its own fall speed.
    pub fn spawn_group_at(&mut self, origin: Point) -> usize {
        let speed = self.config.pixel_speed;

        for _ in 0..self.config.batch_size {
            let speed_y = self.rng.gen_range(speed.min..speed.max);

            self.pixels.push(Pixel::new(
                origin,
                self.config.pixel_size,
                speed_y,
                self.config.color,
            ));
        }

        self.config.batch_size
    }

    /// Splits and removes every pixel whose position lies inside `rect`, exactly as if it had
    /// landed. Returns the number of pixels struck.
    pub fn strike(&mut self, rect: &Rect) -> usize {
        let (struck, kept): (Vec<Pixel>, Vec<Pixel>) = self
            .pixels
            .drain(..)
            .partition(|pixel| rect.contains(pixel.position));

        self.pixels = kept;

        for pixel in &struck {
            self.particles
                .extend(pixel.split(&mut self.rng, &self.config));
        }

        struck.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_config() -> RainConfig {
        RainConfig {
            spawn_probability: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn group_spawns_on_top_edge() {
        let mut animator = Animator::new(quiet_config(), Extent::new(800.0, 600.0), 1);

        assert_eq!(animator.spawn_group(), 50);
        assert_eq!(animator.pixels().len(), 50);

        let x = animator.pixels()[0].position.0;

        assert!((0.0..800.0).contains(&x));

        for pixel in animator.pixels() {
            assert_eq!(pixel.position, Point(x, 0.0));
            assert_eq!(pixel.size, 4.0);
            assert!((1.0..3.0).contains(&pixel.speed_y));
        }
    }

    #[test]
    fn landed_pixel_is_removed_on_the_same_tick() {
        let mut animator = Animator::new(quiet_config(), Extent::new(100.0, 10.0), 2);
        animator.pixels.push(Pixel::new(Point(1.0, 5.0), 4.0, 1.0, Default::default()));
        animator.pixels.push(Pixel::new(Point(2.0, 0.0), 4.0, 1.0, Default::default()));

        let report = animator.tick();

        assert_eq!(report.landed, 1);
        assert_eq!(report.particles_created, 8);
        assert_eq!(animator.pixels().len(), 1);
        assert_eq!(animator.pixels()[0].position, Point(2.0, 1.0));

        // Particles from the split are at the clamped landing spot, already one tick old.
        assert_eq!(animator.particles().len(), 8);
        assert!(animator.particles().iter().all(|p| (p.size - 1.9).abs() < 1e-12));
    }

    #[test]
    fn rain_until_empty() {
        let mut animator = Animator::new(quiet_config(), Extent::new(800.0, 600.0), 3);
        animator.spawn_group_at(Point(100.0, 0.0));

        let mut created = 0;
        let mut landed = 0;
        let mut ticks = 0;

        while !animator.pixels().is_empty() {
            let (l, c) = animator.step_pixels();
            landed += l;
            created += c;
            ticks += 1;
            assert!(ticks <= 600, "pixels never reached the floor");
        }

        assert_eq!(landed, 50);
        assert_eq!(created, 400);
        assert_eq!(animator.particles().len(), 400);
        assert!(animator.pixels().is_empty());
    }

    #[test]
    fn particles_expire() {
        let mut animator = Animator::new(quiet_config(), Extent::new(800.0, 600.0), 4);
        animator.spawn_group_at(Point(100.0, 596.0));
        animator.step_pixels();

        let mut expired = 0;

        for _ in 0..100 {
            expired += animator.step_particles();
        }

        assert_eq!(expired, 400);
        assert!(animator.particles().is_empty());
    }

    #[test]
    fn strike_removes_every_contained_pixel() {
        let mut animator = Animator::new(quiet_config(), Extent::new(800.0, 600.0), 5);

        // Adjacent pixels inside the box, which splice-while-iterating would skip.
        for x in [10.0, 11.0, 12.0, 50.0, 13.0] {
            animator
                .pixels
                .push(Pixel::new(Point(x, 20.0), 4.0, 1.0, Default::default()));
        }

        let struck = animator.strike(&Rect::new(10.0, 10.0, 20.0, 20.0));

        assert_eq!(struck, 4);
        assert_eq!(animator.pixels().len(), 1);
        assert_eq!(animator.pixels()[0].position, Point(50.0, 20.0));
        assert_eq!(animator.particles().len(), 32);
        assert!(animator.particles().iter().all(|p| p.size == 2.0));
    }

    #[test]
    fn strike_matches_ground_impact() {
        let mut animator = Animator::new(quiet_config(), Extent::new(800.0, 600.0), 6);
        animator
            .pixels
            .push(Pixel::new(Point(30.0, 30.0), 4.0, 1.0, Default::default()));

        assert_eq!(animator.strike(&Rect::new(0.0, 0.0, 5.0, 5.0)), 0);
        assert_eq!(animator.strike(&Rect::new(25.0, 25.0, 35.0, 35.0)), 1);
        assert!(animator.pixels().is_empty());
        assert_eq!(animator.particles().len(), 8);
    }

    #[test]
    fn spawning_follows_probability() {
        let always = RainConfig {
            spawn_probability: 1.0,
            ..Default::default()
        };
        let mut animator = Animator::new(always, Extent::new(800.0, 600.0), 7);

        assert_eq!(animator.tick().spawned, 50);
        assert_eq!(animator.tick().spawned, 50);
        assert_eq!(animator.pixels().len(), 100);

        let mut animator = Animator::new(quiet_config(), Extent::new(800.0, 600.0), 7);

        for _ in 0..100 {
            assert_eq!(animator.tick().spawned, 0);
        }
    }

    #[test]
    fn reports_accumulate() {
        let mut animator = Animator::new(quiet_config(), Extent::new(800.0, 8.0), 9);
        animator.spawn_group_at(Point(100.0, 0.0));

        let mut totals = TickReport::default();

        for _ in 0..40 {
            totals += animator.tick();
        }

        assert_eq!(totals.landed, 50);
        assert_eq!(totals.particles_created, 400);
        assert_eq!(totals.expired, 400);
        assert_eq!(totals.spawned, 0);
    }

    #[test]
    fn resize_moves_the_floor() {
        let mut animator = Animator::new(quiet_config(), Extent::new(800.0, 600.0), 8);
        animator
            .pixels
            .push(Pixel::new(Point(30.0, 300.0), 4.0, 1.0, Default::default()));

        animator.resize(Extent::new(400.0, 200.0));

        assert_eq!(animator.bounds(), Extent::new(400.0, 200.0));
        assert_eq!(animator.step_pixels(), (1, 8));
        assert!(animator.pixels().is_empty());
    }
}
