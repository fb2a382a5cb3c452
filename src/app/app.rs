use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use shared::{Animator, ConfigError, Extent, RainConfig, Rect, TickReport};
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::draw::draw_rain;

/// Errors concerning the [`App`] and the page it drives.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppError(pub String);

impl Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AppError: {}", self.0)
    }
}

impl From<ConfigError> for AppError {
    fn from(config_error: ConfigError) -> Self {
        AppError(format!("ConfigError: {0}", config_error.0))
    }
}

impl From<AppError> for JsValue {
    fn from(app_error: AppError) -> Self {
        JsValue::from_str(&app_error.to_string())
    }
}

/// State shared by the animation loop and the hand tracker.
pub struct App {
    animator: Animator,
    frame: u64,
    totals: TickReport,
}

impl App {
    pub fn new(config: RainConfig, bounds: Extent, seed: u64) -> App {
        App {
            animator: Animator::new(config, bounds, seed),
            frame: 0,
            totals: TickReport::default(),
        }
    }

    pub fn config(&self) -> &RainConfig {
        self.animator.config()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Live pixel and particle counts.
    pub fn population(&self) -> (usize, usize) {
        (self.animator.pixels().len(), self.animator.particles().len())
    }

    /// Everything counted since the first frame.
    pub fn totals(&self) -> TickReport {
        self.totals
    }

    pub fn tick(&mut self) {
        self.frame += 1;
        self.totals += self.animator.tick();
    }

    pub fn draw(&self, context: &CanvasRenderingContext2d) {
        draw_rain(context, &self.animator);
    }

    /// Breaks every raindrop under the umbrella.
    pub fn strike(&mut self, umbrella: &Rect) -> usize {
        self.animator.strike(umbrella)
    }

    pub fn resize(&mut self, bounds: Extent) {
        self.animator.resize(bounds);
    }
}
