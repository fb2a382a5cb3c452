use std::{cell::RefCell, rc::Rc};

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{console, CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement};

use crate::{
    app::{load_model, App, HandMarkers, Tracker, Umbrella},
    camera::setup_camera,
    run_animation, viewport,
};

/// Page pieces that only come alive once the user presses start.
pub struct Stage {
    pub context: CanvasRenderingContext2d,
    pub video: HtmlVideoElement,
    pub umbrella: Umbrella,
    pub markers: HandMarkers,
}

pub fn on_resize(app: &Rc<RefCell<App>>, canvas: &HtmlCanvasElement) {
    let bounds = viewport();

    canvas.set_width(bounds.width as u32);
    canvas.set_height(bounds.height as u32);

    app.borrow_mut().resize(bounds);
}

/// Opens the camera and loads the model side by side, then starts the rain and the tracker.
pub async fn on_start(app: Rc<RefCell<App>>, stage: Stage) -> Result<(), JsValue> {
    let (resolution, fingertip_index) = {
        let app = app.borrow();
        (app.config().video, app.config().fingertip_index)
    };

    let ((), model) =
        futures::try_join!(setup_camera(&stage.video, resolution), load_model())?;

    JsFuture::from(stage.video.play()?).await?;

    console::log_1(&"starting rain".into());

    run_animation(app.clone(), stage.context);

    let tracker = Tracker::new(
        model,
        stage.video,
        stage.umbrella,
        stage.markers,
        fingertip_index,
    );

    spawn_local(tracker.run(app));

    Ok(())
}
