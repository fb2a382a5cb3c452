use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{console, HtmlAudioElement};

/// Looping rain soundtrack backed by an `<audio>` element on the page.
#[derive(Clone, Debug)]
pub struct AmbientAudio {
    element: HtmlAudioElement,
}

impl AmbientAudio {
    pub fn new(element: HtmlAudioElement) -> AmbientAudio {
        element.set_loop(true);

        AmbientAudio { element }
    }

    /// Starts playback. Must be called from within a user gesture or the browser refuses.
    pub fn play(&self) {
        match self.element.play() {
            Ok(promise) => spawn_local(async move {
                if let Err(err) = JsFuture::from(promise).await {
                    console::warn_2(&"rain sound was blocked".into(), &err);
                }
            }),
            Err(err) => console::warn_2(&"could not start rain sound".into(), &err),
        }
    }
}
