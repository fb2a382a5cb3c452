mod app;
mod callbacks;
mod camera;
mod draw;

use std::{cell::RefCell, rc::Rc};

use app::{AmbientAudio, App, AppError, HandMarkers, Umbrella};
use callbacks::{on_resize, on_start, Stage};
use js_sys::Promise;
use shared::{Extent, RainConfig};
use wasm_bindgen::{prelude::*, JsCast};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{console, CanvasRenderingContext2d};

pub const CANVAS_ID: &str = "canvas";
pub const VIDEO_ID: &str = "video";
pub const START_BUTTON_ID: &str = "start-button";
pub const RAIN_SOUND_ID: &str = "rain-sound";
pub const CONFIG_ID: &str = "rain-config";

/// Frames between population reports in the console.
const REPORT_FRAMES: u64 = 600;

fn window() -> web_sys::Window {
    web_sys::window().expect("no global `window` exists")
}

fn request_animation_frame(f: &Closure<dyn FnMut()>) {
    window()
        .request_animation_frame(f.as_ref().unchecked_ref())
        .expect("should register `requestAnimationFrame` OK");
}

fn document() -> web_sys::Document {
    window()
        .document()
        .expect("should have a document on window")
}

/// Resolves on the next animation frame.
async fn next_animation_frame() -> Result<(), JsValue> {
    let mut scheduled = Ok(0);

    let promise = Promise::new(&mut |resolve, _reject| {
        scheduled = window().request_animation_frame(&resolve);
    });

    scheduled?;
    JsFuture::from(promise).await?;

    Ok(())
}

/// Size of the browser viewport in CSS pixels.
fn viewport() -> Extent {
    let window = window();
    let dimension = |value: Result<JsValue, JsValue>| {
        value.ok().and_then(|value| value.as_f64()).unwrap_or(0.0)
    };

    Extent::new(
        dimension(window.inner_width()),
        dimension(window.inner_height()),
    )
}

fn element_by_id<T: JsCast>(id: &str) -> Result<T, AppError> {
    document()
        .get_element_by_id(id)
        .ok_or_else(|| AppError(format!("missing element #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| AppError(format!("element #{id} has an unexpected type")))
}

/// Reads the optional JSON config block. Anything unusable falls back to the defaults.
fn load_config() -> RainConfig {
    let text = match document().get_element_by_id(CONFIG_ID) {
        Some(element) => element.text_content().unwrap_or_default(),
        None => return RainConfig::default(),
    };

    match RainConfig::from_json(&text) {
        Ok(config) => {
            if let Ok(json) = serde_json::to_string(&config) {
                console::log_1(&format!("rain config: {json}").into());
            }

            config
        }
        Err(err) => {
            console::warn_1(&format!("{err}, using default rain config").into());
            RainConfig::default()
        }
    }
}

/// Ticks and redraws the rain on every animation frame, forever.
fn run_animation(app: Rc<RefCell<App>>, context: CanvasRenderingContext2d) {
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();

    *g.borrow_mut() = Some(Closure::new(move || {
        {
            let mut app = app.borrow_mut();

            app.tick();
            app.draw(&context);

            if app.frame() % REPORT_FRAMES == 0 {
                let (pixels, particles) = app.population();
                let totals = app.totals();
                console::log_1(
                    &format!(
                        "frame {}: {pixels} pixels, {particles} particles, {} landed, {} expired",
                        app.frame(),
                        totals.landed,
                        totals.expired,
                    )
                    .into(),
                );
            }
        }

        if let Some(closure) = f.borrow().as_ref() {
            request_animation_frame(closure);
        }
    }));

    if let Some(closure) = g.borrow().as_ref() {
        request_animation_frame(closure);
    };
}

#[wasm_bindgen(start)]
fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let config = load_config();
    let document = document();

    let canvas = element_by_id::<web_sys::HtmlCanvasElement>(CANVAS_ID)?;
    let video = element_by_id::<web_sys::HtmlVideoElement>(VIDEO_ID)?;
    let start_button = element_by_id::<web_sys::HtmlElement>(START_BUTTON_ID)?;
    let audio = AmbientAudio::new(element_by_id::<web_sys::HtmlAudioElement>(RAIN_SOUND_ID)?);

    let bounds = viewport();

    canvas.set_width(bounds.width as u32);
    canvas.set_height(bounds.height as u32);

    let context = canvas
        .get_context("2d")?
        .ok_or_else(|| AppError("canvas has no 2d context".to_string()))?
        .dyn_into::<CanvasRenderingContext2d>()?;

    let umbrella = Umbrella::create(&document, &config.umbrella_src)?;
    let markers = HandMarkers::create(&document, config.landmark_count)?;

    let seed = (js_sys::Math::random() * (1u64 << 53) as f64) as u64;
    let app = Rc::new(RefCell::new(App::new(config, bounds, seed)));

    {
        let app = app.clone();
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_: web_sys::Event| {
            on_resize(&app, &canvas);
        });
        window().add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    {
        let app = app.clone();
        let button = start_button.clone();
        let mut stage = Some(Stage {
            context,
            video,
            umbrella,
            markers,
        });

        let closure = Closure::<dyn FnMut(_)>::new(move |_: web_sys::Event| {
            // A second click has nothing left to start.
            let stage = match stage.take() {
                Some(stage) => stage,
                None => return,
            };

            audio.play();

            if let Err(err) = button.style().set_property("display", "none") {
                console::warn_2(&"could not hide start button".into(), &err);
            }

            let app = app.clone();

            spawn_local(async move {
                if let Err(err) = on_start(app, stage).await {
                    console::error_2(&"startup failed".into(), &err);
                }
            });
        });
        start_button
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}
