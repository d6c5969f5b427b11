/// OpenCV `highgui` window: frame display, key polling and ROI selection.
use opencv::core::{Mat, Rect};
use opencv::highgui;

use crate::display::domain::display::{Display, Key};
use crate::shared::bounding_box::BoundingBox;
use crate::shared::constants::{BOX_COLOR, BOX_THICKNESS};
use crate::shared::frame::Frame;
use crate::shared::opencv_mat::{draw_boxes, frame_to_bgr_mat};

pub struct HighguiDisplay {
    window: String,
    open: bool,
}

impl HighguiDisplay {
    pub fn new(window: &str) -> Self {
        Self {
            window: window.to_string(),
            open: false,
        }
    }
}

fn render(frame: &Frame, boxes: &[BoundingBox]) -> Result<Mat, Box<dyn std::error::Error>> {
    let mut mat = frame_to_bgr_mat(frame)?;
    draw_boxes(&mut mat, boxes, BOX_COLOR, BOX_THICKNESS)?;
    Ok(mat)
}

impl Display for HighguiDisplay {
    fn show(
        &mut self,
        frame: &Frame,
        boxes: &[BoundingBox],
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mat = render(frame, boxes)?;
        highgui::imshow(&self.window, &mat)?;
        self.open = true;
        Ok(())
    }

    fn poll_key(&mut self, delay_ms: i32) -> Result<Option<Key>, Box<dyn std::error::Error>> {
        let code = highgui::wait_key(delay_ms.max(1))?;
        if code < 0 {
            return Ok(None);
        }
        Ok(Some(decode_key(code)))
    }

    fn select_box(
        &mut self,
        frame: &Frame,
        boxes: &[BoundingBox],
    ) -> Result<BoundingBox, Box<dyn std::error::Error>> {
        let mat = render(frame, boxes)?;
        let rect: Rect = highgui::select_roi_def(&self.window, &mat)?;
        Ok(BoundingBox::from(rect))
    }

    fn close(&mut self) {
        if !self.open {
            return;
        }
        if let Err(e) = highgui::destroy_all_windows() {
            log::warn!("Failed to close display: {e}");
        }
        self.open = false;
    }
}

/// Keeps the low byte of a `wait_key` code, as modifier bits ride above it.
fn decode_key(code: i32) -> Key {
    Key::from_char(char::from((code & 0xFF) as u8))
}
