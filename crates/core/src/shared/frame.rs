use ndarray::ArrayView3;

/// A single video frame: contiguous RGB bytes in row-major order.
///
/// Format conversion happens at I/O boundaries only (ffmpeg on the way in,
/// OpenCV on the way out); the domain layer treats pixel data as opaque.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    /// Returns a copy scaled to `target_width`, keeping the aspect ratio.
    ///
    /// Frames already at the target width are cloned as-is.
    pub fn resized_to_width(&self, target_width: u32) -> Result<Frame, Box<dyn std::error::Error>> {
        if target_width == 0 {
            return Err("target width must be positive".into());
        }
        if self.width == target_width || self.width == 0 {
            return Ok(self.clone());
        }
        if self.channels != 3 {
            return Err(format!("cannot resize {}-channel frame", self.channels).into());
        }

        let ratio = target_width as f64 / self.width as f64;
        let target_height = ((self.height as f64 * ratio).round() as u32).max(1);

        let src = image::RgbImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or("frame buffer does not match its dimensions")?;
        let resized = image::imageops::resize(
            &src,
            target_width,
            target_height,
            image::imageops::FilterType::Triangle,
        );

        Ok(Frame::new(
            resized.into_raw(),
            target_width,
            target_height,
            3,
            self.index,
        ))
    }

    /// Copies out the pixels inside a clamped rectangle.
    ///
    /// Returns `None` when the rectangle does not overlap the frame.
    pub fn crop(&self, x: i32, y: i32, width: i32, height: i32) -> Option<(Vec<u8>, u32, u32)> {
        let x1 = x.max(0) as u32;
        let y1 = y.max(0) as u32;
        let x2 = ((x + width).max(0) as u32).min(self.width);
        let y2 = ((y + height).max(0) as u32).min(self.height);
        if x2 <= x1 || y2 <= y1 {
            return None;
        }

        let ch = self.channels as usize;
        let row_bytes = (x2 - x1) as usize * ch;
        let mut out = Vec::with_capacity(row_bytes * (y2 - y1) as usize);
        for row in y1..y2 {
            let start = (row as usize * self.width as usize + x1 as usize) * ch;
            out.extend_from_slice(&self.data[start..start + row_bytes]);
        }
        Some((out, x2 - x1, y2 - y1))
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 12]; // 2x2x3
        let frame = Frame::new(data.clone(), 2, 2, 3, 5);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.index(), 5);
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * channels")]
    fn test_mismatched_data_length_panics_in_debug() {
        let data = vec![0u8; 10];
        Frame::new(data, 2, 2, 3, 0);
    }

    #[test]
    fn test_as_ndarray_pixel_access() {
        let mut data = vec![0u8; 12];
        data[6] = 255; // row=1, col=0, R
        let frame = Frame::new(data, 2, 2, 3, 0);
        let arr = frame.as_ndarray();
        assert_eq!(arr.shape(), &[2, 2, 3]);
        assert_eq!(arr[[1, 0, 0]], 255);
        assert_eq!(arr[[1, 0, 1]], 0);
    }

    #[test]
    fn test_resize_keeps_aspect_ratio() {
        let frame = Frame::new(vec![10u8; 1200 * 800 * 3], 1200, 800, 3, 7);
        let resized = frame.resized_to_width(600).unwrap();
        assert_eq!(resized.width(), 600);
        assert_eq!(resized.height(), 400);
        assert_eq!(resized.index(), 7);
        assert_eq!(resized.data().len(), 600 * 400 * 3);
    }

    #[test]
    fn test_resize_upscales_small_frames() {
        let frame = Frame::new(vec![10u8; 300 * 100 * 3], 300, 100, 3, 0);
        let resized = frame.resized_to_width(600).unwrap();
        assert_eq!((resized.width(), resized.height()), (600, 200));
    }

    #[test]
    fn test_resize_same_width_is_identity() {
        let frame = Frame::new(vec![42u8; 600 * 10 * 3], 600, 10, 3, 0);
        let resized = frame.resized_to_width(600).unwrap();
        assert_eq!(resized.data(), frame.data());
    }

    #[test]
    fn test_resize_rejects_zero_width() {
        let frame = Frame::new(vec![0u8; 12], 2, 2, 3, 0);
        assert!(frame.resized_to_width(0).is_err());
    }

    #[test]
    fn test_crop_clamps_to_frame() {
        let mut data = vec![0u8; 4 * 4 * 3];
        data[(3 * 4 + 3) * 3] = 9; // bottom-right pixel
        let frame = Frame::new(data, 4, 4, 3, 0);
        let (pixels, w, h) = frame.crop(2, 2, 10, 10).unwrap();
        assert_eq!((w, h), (2, 2));
        assert_eq!(pixels.len(), 2 * 2 * 3);
        assert_eq!(pixels[3 * 3], 9);
    }

    #[test]
    fn test_crop_outside_frame_is_none() {
        let frame = Frame::new(vec![0u8; 4 * 4 * 3], 4, 4, 3, 0);
        assert!(frame.crop(10, 10, 5, 5).is_none());
        assert!(frame.crop(-10, 0, 5, 5).is_none());
    }
}
