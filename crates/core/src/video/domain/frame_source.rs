use crate::shared::frame::Frame;

/// Yields successive frames from a camera or a decoded file.
///
/// Implementations hide capture and codec details; the controller only sees
/// [`Frame`]s and the end-of-stream signal.
pub trait FrameSource {
    /// Blocks until the next frame is available. `Ok(None)` marks the end of
    /// the stream and is not an error.
    fn next_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>>;

    /// Stops capture or closes the file. Safe to call more than once.
    fn release(&mut self);
}
