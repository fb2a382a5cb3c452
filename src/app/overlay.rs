use shared::{Point, Rect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, HtmlImageElement};

use crate::app::AppError;

pub const UMBRELLA_ID: &str = "umbrella";
pub const HAND_POINT_CLASS: &str = "hand-point";

fn body(document: &Document) -> Result<HtmlElement, AppError> {
    document
        .body()
        .ok_or_else(|| AppError("document has no body".to_string()))
}

fn place(element: &HtmlElement, location: Point) -> Result<(), JsValue> {
    let style = element.style();

    style.set_property("left", &format!("{}px", location.0))?;
    style.set_property("top", &format!("{}px", location.1))?;

    Ok(())
}

/// The umbrella image that follows the fingertip.
pub struct Umbrella {
    element: HtmlImageElement,
}

impl Umbrella {
    /// Creates the `<img id="umbrella">` and appends it to the body.
    pub fn create(document: &Document, src: &str) -> Result<Umbrella, JsValue> {
        let element = document
            .create_element("img")?
            .dyn_into::<HtmlImageElement>()?;

        element.set_id(UMBRELLA_ID);
        element.set_src(src);
        element.style().set_property("position", "absolute")?;

        body(document)?.append_child(&element)?;

        Ok(Umbrella { element })
    }

    /// Moves the image so its centre lies on `center`.
    pub fn center_on(&self, center: Point) -> Result<(), JsValue> {
        let rect = Rect::centered(
            center,
            self.element.width() as f64,
            self.element.height() as f64,
        );

        place(&self.element, rect.origin())
    }

    /// Where the browser currently lays the umbrella out.
    pub fn bounds(&self) -> Rect {
        let rect = self.element.get_bounding_client_rect();

        Rect::new(rect.left(), rect.top(), rect.right(), rect.bottom())
    }
}

/// One dot per hand landmark, created once and moved on every detection.
pub struct HandMarkers {
    markers: Vec<HtmlElement>,
}

impl HandMarkers {
    pub fn create(document: &Document, count: usize) -> Result<HandMarkers, JsValue> {
        let body = body(document)?;

        let markers = (0..count)
            .map(|_| -> Result<HtmlElement, JsValue> {
                let marker = document.create_element("div")?.dyn_into::<HtmlElement>()?;

                marker.set_class_name(HAND_POINT_CLASS);
                marker.style().set_property("position", "absolute")?;
                body.append_child(&marker)?;

                Ok(marker)
            })
            .collect::<Result<Vec<HtmlElement>, JsValue>>()?;

        Ok(HandMarkers { markers })
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Moves marker `i` to the `i`th point. Extra points are ignored.
    pub fn place(&self, points: impl IntoIterator<Item = Point>) -> Result<(), JsValue> {
        for (marker, point) in self.markers.iter().zip(points) {
            place(marker, point)?;
        }

        Ok(())
    }
}
