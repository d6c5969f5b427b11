use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;

/// A detected face, edges in pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceLocation {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl From<FaceLocation> for BoundingBox {
    fn from(loc: FaceLocation) -> Self {
        BoundingBox::from_trbl(loc.top, loc.right, loc.bottom, loc.left)
    }
}

/// Domain interface for face detection.
///
/// Implementations may keep inference sessions or scratch buffers between
/// calls, hence `&mut self`.
pub trait FaceLocator: Send {
    fn locate(&mut self, frame: &Frame) -> Result<Vec<FaceLocation>, Box<dyn std::error::Error>>;
}
