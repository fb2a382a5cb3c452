use js_sys::{Object, Promise, Reflect};
use shared::Extent;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{console, HtmlVideoElement, MediaStream, MediaStreamConstraints};

use crate::window;

/// Asks for the webcam at `resolution`, attaches the stream to `video` and waits for its
/// metadata, so that `video_width` and `video_height` are known when this returns.
pub async fn setup_camera(video: &HtmlVideoElement, resolution: Extent) -> Result<(), JsValue> {
    let media_devices = window().navigator().media_devices()?;

    let video_constraints = Object::new();
    Reflect::set(&video_constraints, &"width".into(), &resolution.width.into())?;
    Reflect::set(&video_constraints, &"height".into(), &resolution.height.into())?;

    let constraints = MediaStreamConstraints::new();
    constraints.set_video(&video_constraints);

    let stream = JsFuture::from(media_devices.get_user_media_with_constraints(&constraints)?)
        .await?
        .dyn_into::<MediaStream>()?;

    video.set_src_object(Some(&stream));

    let metadata = Promise::new(&mut |resolve, _reject| {
        video.set_onloadedmetadata(Some(&resolve));
    });

    JsFuture::from(metadata).await?;
    video.set_onloadedmetadata(None);

    console::log_1(
        &format!(
            "camera streaming at {}x{}",
            video.video_width(),
            video.video_height()
        )
        .into(),
    );

    Ok(())
}
