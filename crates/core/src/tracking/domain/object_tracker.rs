use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;

use super::tracker_kind::TrackerKind;

/// Domain interface for a single-object visual tracker.
///
/// The algorithm itself lives in an external vision library; this trait only
/// fixes the lifecycle: anchor once, then advance one frame at a time.
pub trait ObjectTracker {
    fn init(&mut self, frame: &Frame, bbox: BoundingBox)
        -> Result<(), Box<dyn std::error::Error>>;

    /// Advances by one frame. `Ok((false, _))` means the target was lost on
    /// this frame; the returned box is the tracker's best remaining estimate.
    fn update(&mut self, frame: &Frame)
        -> Result<(bool, BoundingBox), Box<dyn std::error::Error>>;
}

/// Builds an uninitialized tracker for a given algorithm.
pub trait TrackerFactory {
    fn create(&self, kind: TrackerKind) -> Result<Box<dyn ObjectTracker>, Box<dyn std::error::Error>>;
}
