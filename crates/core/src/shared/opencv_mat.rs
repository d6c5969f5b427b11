//! Conversions between domain types and OpenCV's `Mat`/`Rect`.
//!
//! OpenCV expects BGR channel order; [`Frame`] is RGB, so channels are
//! swapped on the way out.

use opencv::core::{Mat, Point, Rect, Scalar, CV_8UC3};
use opencv::imgproc;
use opencv::prelude::*;

use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;

pub fn frame_to_bgr_mat(frame: &Frame) -> Result<Mat, Box<dyn std::error::Error>> {
    if frame.channels() != 3 {
        return Err(format!("expected a 3-channel frame, got {}", frame.channels()).into());
    }

    let mut mat = Mat::new_rows_cols_with_default(
        frame.height() as i32,
        frame.width() as i32,
        CV_8UC3,
        Scalar::all(0.0),
    )?;

    let dst = mat.data_bytes_mut()?;
    for (bgr, rgb) in dst.chunks_exact_mut(3).zip(frame.data().chunks_exact(3)) {
        bgr[0] = rgb[2];
        bgr[1] = rgb[1];
        bgr[2] = rgb[0];
    }
    Ok(mat)
}

/// Strokes each box from `(left, top)` to `(right, bottom)` inclusive, so
/// the outline sits on the box edges rather than inside them.
pub fn draw_boxes(
    mat: &mut Mat,
    boxes: &[BoundingBox],
    rgb: [u8; 3],
    thickness: i32,
) -> opencv::Result<()> {
    let color = Scalar::new(rgb[2] as f64, rgb[1] as f64, rgb[0] as f64, 0.0);
    for b in boxes {
        imgproc::rectangle_points(
            mat,
            Point::new(b.left, b.top),
            Point::new(b.right(), b.bottom()),
            color,
            thickness,
            imgproc::LINE_8,
            0,
        )?;
    }
    Ok(())
}

impl From<BoundingBox> for Rect {
    fn from(b: BoundingBox) -> Self {
        Rect::new(b.left, b.top, b.width, b.height)
    }
}

impl From<Rect> for BoundingBox {
    fn from(r: Rect) -> Self {
        BoundingBox::new(r.x, r.y, r.width, r.height)
    }
}
