use crate::shared::frame::Frame;

use super::face_locator::FaceLocation;

/// Domain interface for computing one embedding per located face.
///
/// The returned vector is parallel to `locations`.
pub trait FaceEncoder: Send {
    fn encode(
        &mut self,
        frame: &Frame,
        locations: &[FaceLocation],
    ) -> Result<Vec<Vec<f32>>, Box<dyn std::error::Error>>;
}
