use std::{cell::RefCell, rc::Rc};

use js_sys::Promise;
use shared::{Extent, Hand, HandFix, ScreenMapper};
use wasm_bindgen::{prelude::*, JsCast};
use wasm_bindgen_futures::JsFuture;
use web_sys::{console, HtmlVideoElement};

use super::{App, HandMarkers, Umbrella};
use crate::{next_animation_frame, viewport};

#[wasm_bindgen]
extern "C" {
    /// A loaded `handpose` model, provided by the TensorFlow.js script on the page.
    pub type HandPoseModel;

    #[wasm_bindgen(catch, js_namespace = handpose, js_name = load)]
    fn load_handpose() -> Result<Promise, JsValue>;

    #[wasm_bindgen(catch, method, js_name = estimateHands)]
    fn estimate_hands(this: &HandPoseModel, input: &HtmlVideoElement) -> Result<Promise, JsValue>;
}

/// Downloads the pretrained weights and resolves once the model is usable.
pub async fn load_model() -> Result<HandPoseModel, JsValue> {
    let model = JsFuture::from(load_handpose()?).await?;

    console::log_1(&"handpose model loaded".into());

    Ok(model.unchecked_into())
}

/// Feeds camera frames to the model and moves the umbrella onto the fingertip.
pub struct Tracker {
    model: HandPoseModel,
    video: HtmlVideoElement,
    umbrella: Umbrella,
    markers: HandMarkers,
    fingertip_index: usize,
}

impl Tracker {
    pub fn new(
        model: HandPoseModel,
        video: HtmlVideoElement,
        umbrella: Umbrella,
        markers: HandMarkers,
        fingertip_index: usize,
    ) -> Tracker {
        Tracker {
            model,
            video,
            umbrella,
            markers,
            fingertip_index,
        }
    }

    async fn predict(&self) -> Result<Vec<Hand>, JsValue> {
        let predictions = JsFuture::from(self.model.estimate_hands(&self.video)?).await?;

        match serde_wasm_bindgen::from_value(predictions) {
            Ok(hands) => Ok(hands),
            Err(err) => {
                console::warn_1(&format!("unreadable hand prediction: {err}").into());
                Ok(Vec::new())
            }
        }
    }

    /// Runs one detection. Returns whether a hand was found.
    pub async fn detect(&self, app: &Rc<RefCell<App>>) -> Result<bool, JsValue> {
        let hands = self.predict().await?;

        let mapper = ScreenMapper::new(
            Extent::new(
                self.video.video_width() as f64,
                self.video.video_height() as f64,
            ),
            viewport(),
        );

        let fix = match HandFix::locate(&hands, &mapper, self.fingertip_index) {
            Some(fix) => fix,
            None => return Ok(false),
        };

        self.markers.place(fix.markers)?;

        if let Some(fingertip) = fix.fingertip {
            self.umbrella.center_on(fingertip)?;
            app.borrow_mut().strike(&self.umbrella.bounds());
        }

        Ok(true)
    }

    /// Detects forever, one inference per animation frame. A failed inference ends the loop.
    pub async fn run(self, app: Rc<RefCell<App>>) {
        console::log_1(&format!("tracking {} hand landmarks", self.markers.len()).into());

        loop {
            if let Err(err) = self.detect(&app).await {
                console::error_2(&"hand detection stopped".into(), &err);
                break;
            }

            if let Err(err) = next_animation_frame().await {
                console::error_2(&"could not schedule hand detection".into(), &err);
                break;
            }
        }
    }
}
