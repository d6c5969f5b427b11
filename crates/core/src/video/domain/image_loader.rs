use std::path::Path;

use crate::shared::frame::Frame;

/// Decodes a single still image into a [`Frame`].
pub trait ImageLoader: Send {
    fn load(&self, path: &Path) -> Result<Frame, Box<dyn std::error::Error>>;
}
