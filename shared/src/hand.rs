use serde::Deserialize;

use crate::{Extent, Point};

/// Joints reported per hand by the pose model.
pub const LANDMARK_COUNT: usize = 21;

/// Landmark index of the index-finger tip.
pub const FINGERTIP_INDEX: usize = 8;

/// One detected joint in video pixel space.
///
/// The model reports `[x, y, z]`; depth is discarded.
#[derive(PartialEq, Clone, Copy, Debug, Deserialize)]
#[serde(try_from = "Vec<f64>")]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
}

impl TryFrom<Vec<f64>> for Landmark {
    type Error = String;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        match value.as_slice() {
            [x, y, ..] => Ok(Landmark { x: *x, y: *y }),
            _ => Err(format!(
                "landmark needs at least 2 coordinates, got {}",
                value.len()
            )),
        }
    }
}

/// A single hand prediction. Fields the model adds besides `landmarks` are ignored.
#[derive(Clone, Debug, Deserialize)]
pub struct Hand {
    pub landmarks: Vec<Landmark>,
}

impl Hand {
    pub fn landmark(&self, index: usize) -> Option<&Landmark> {
        self.landmarks.get(index)
    }
}

/// Maps video coordinates onto the screen, mirrored horizontally so the page behaves like a
/// mirror of the user.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct ScreenMapper {
    pub video: Extent,
    pub screen: Extent,
}

impl ScreenMapper {
    pub fn new(video: Extent, screen: Extent) -> ScreenMapper {
        ScreenMapper { video, screen }
    }

    /// `None` while the video reports no dimensions, e.g. before its metadata has loaded.
    pub fn to_screen(&self, landmark: &Landmark) -> Option<Point> {
        if self.video.is_empty() {
            return None;
        }

        Some(Point(
            self.screen.width - (landmark.x / self.video.width) * self.screen.width,
            (landmark.y / self.video.height) * self.screen.height,
        ))
    }

    /// Screen positions of every landmark of `hand`, in order.
    pub fn map_hand<'a>(&'a self, hand: &'a Hand) -> impl Iterator<Item = Point> + 'a {
        hand.landmarks
            .iter()
            .filter_map(move |landmark| self.to_screen(landmark))
    }
}

/// Screen-space placement of the first detected hand.
#[derive(PartialEq, Clone, Debug)]
pub struct HandFix {
    /// Mapped landmarks, in model order.
    pub markers: Vec<Point>,
    /// Where the umbrella goes, if the fingertip landmark was reported and mappable.
    pub fingertip: Option<Point>,
}

impl HandFix {
    /// `None` when no hand was detected, in which case nothing on screen should move.
    /// Only the first hand is followed.
    pub fn locate(hands: &[Hand], mapper: &ScreenMapper, fingertip_index: usize) -> Option<HandFix> {
        let hand = hands.first()?;

        Some(HandFix {
            markers: mapper.map_hand(hand).collect(),
            fingertip: hand
                .landmark(fingertip_index)
                .and_then(|landmark| mapper.to_screen(landmark)),
        })
    }
}
