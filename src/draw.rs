use shared::{Animator, Color, Point};
use web_sys::CanvasRenderingContext2d;

/// Fills a `size` by `size` square with its top-left corner on `position`.
pub fn draw_square(context: &CanvasRenderingContext2d, position: Point, size: f64) {
    context.fill_rect(position.0, position.1, size, size);
}

/// Tracks the current fill colour so it is only sent to the canvas when it changes.
struct Fill<'a> {
    context: &'a CanvasRenderingContext2d,
    color: Option<Color>,
}

impl Fill<'_> {
    fn set(&mut self, color: Color) {
        if self.color != Some(color) {
            self.context.set_fill_style_str(&color.css());
            self.color = Some(color);
        }
    }
}

/// Clears the canvas and draws every raindrop and fragment.
pub fn draw_rain(context: &CanvasRenderingContext2d, animator: &Animator) {
    let bounds = animator.bounds();

    context.clear_rect(0.0, 0.0, bounds.width, bounds.height);

    let mut fill = Fill {
        context,
        color: None,
    };

    for pixel in animator.pixels() {
        fill.set(pixel.color);
        draw_square(context, pixel.position, pixel.size);
    }

    for particle in animator.particles().iter().filter(|particle| particle.is_alive()) {
        fill.set(particle.color);
        draw_square(context, particle.position, particle.size);
    }
}
