//! Simulation and geometry for the umbrella rain page. Nothing in this crate touches the browser.

mod animator;
pub use animator::*;

mod config;
pub use config::*;

mod geometry;
pub use geometry::*;

mod hand;
pub use hand::*;

mod particle;
pub use particle::*;

mod pixel;
pub use pixel::*;
