mod app;
mod audio;
mod overlay;
mod tracker;

pub use app::*;
pub use audio::*;
pub use overlay::*;
pub use tracker::*;
