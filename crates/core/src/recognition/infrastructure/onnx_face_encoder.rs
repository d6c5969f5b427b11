/// ArcFace face encoder using ONNX Runtime.
///
/// Each located face is cropped, resized to 112×112 and embedded; the
/// embedding is L2-normalized so euclidean distances fall in `[0, 2]`.
use std::path::Path;

use crate::recognition::domain::face_encoder::FaceEncoder;
use crate::recognition::domain::face_locator::FaceLocation;
use crate::shared::frame::Frame;

use super::execution_provider::open_session;

const INPUT_SIZE: usize = 112;
const NORM_MEAN: f32 = 127.5;
const NORM_STD: f32 = 127.5;

pub struct OnnxFaceEncoder {
    session: ort::session::Session,
}

impl OnnxFaceEncoder {
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            session: open_session(model_path)?,
        })
    }

    fn embed(
        &mut self,
        rgb_data: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
        let tensor = preprocess(rgb_data, width, height);
        let input_value = ort::value::Tensor::from_array(tensor)?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        let embedding_array = outputs[0].try_extract_array::<f32>()?;
        let embedding_slice = embedding_array
            .as_slice()
            .ok_or("Cannot get embedding slice")?;

        let mut embedding = embedding_slice.to_vec();
        l2_normalize(&mut embedding);
        Ok(embedding)
    }
}

impl FaceEncoder for OnnxFaceEncoder {
    fn encode(
        &mut self,
        frame: &Frame,
        locations: &[FaceLocation],
    ) -> Result<Vec<Vec<f32>>, Box<dyn std::error::Error>> {
        let mut embeddings = Vec::with_capacity(locations.len());
        for loc in locations {
            let (crop, w, h) = frame
                .crop(loc.left, loc.top, loc.right - loc.left, loc.bottom - loc.top)
                .ok_or_else(|| format!("face {loc:?} lies outside the frame"))?;
            embeddings.push(self.embed(&crop, w, h)?);
        }
        Ok(embeddings)
    }
}

/// Resize crop to 112x112, normalize, NCHW layout.
fn preprocess(rgb_data: &[u8], width: u32, height: u32) -> ndarray::Array4<f32> {
    let src_w = width as usize;
    let src_h = height as usize;

    let mut tensor = ndarray::Array4::<f32>::zeros((1, 3, INPUT_SIZE, INPUT_SIZE));

    for y in 0..INPUT_SIZE {
        let src_y = (((y as f64 + 0.5) * src_h as f64 / INPUT_SIZE as f64) as usize).min(src_h - 1);
        for x in 0..INPUT_SIZE {
            let src_x =
                (((x as f64 + 0.5) * src_w as f64 / INPUT_SIZE as f64) as usize).min(src_w - 1);
            let offset = (src_y * src_w + src_x) * 3;
            if offset + 2 < rgb_data.len() {
                for c in 0..3 {
                    tensor[[0, c, y, x]] = (rgb_data[offset + c] as f32 - NORM_MEAN) / NORM_STD;
                }
            }
        }
    }

    tensor
}

pub fn l2_normalize(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}
